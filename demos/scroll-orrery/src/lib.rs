use wasm_bindgen::prelude::*;
use orrery_engine::*;

mod bodies;
mod showcase;
use showcase::ScrollOrrery;

orrery_web::export_showcase!(ScrollOrrery, "scroll-orrery");
