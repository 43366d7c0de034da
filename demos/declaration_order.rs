//! Keeps configuration entries in the order they were declared, so they can be
//! written back out in that same order.

use ordkit::ds::OrderedMap;
use ordkit::error::OrderedMapError;

fn parse(source: &str) -> Result<OrderedMap<String, String>, OrderedMapError> {
    let mut table = OrderedMap::new();
    for line in source.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            table.push_back(key.trim().to_string(), value.trim().to_string())?;
        }
    }
    Ok(table)
}

fn main() {
    let source = "
        # service settings
        name = ordkit-demo
        port = 8080
        workers = 4
        host = 0.0.0.0
    ";

    match parse(source) {
        Ok(table) => {
            println!("Parsed {} settings in declaration order:", table.len());
            for (key, value) in &table {
                println!("  {key} = {value}");
            }
        }
        Err(err) => eprintln!("config error: {err}"),
    }

    let duplicated = "port = 80\nport = 443";
    match parse(duplicated) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("\nRejected duplicated setting: {err}"),
    }
}
