use super::print_json;
use miette::Result;
use serde::Serialize;
use wayfind_core::EMPTY_MODULE;

#[derive(Serialize)]
struct EmptyModuleResult {
    path: &'static str,
}

pub fn run(json: bool) -> Result<()> {
    if json {
        return print_json(&EmptyModuleResult { path: EMPTY_MODULE });
    }
    println!("{EMPTY_MODULE}");
    Ok(())
}
