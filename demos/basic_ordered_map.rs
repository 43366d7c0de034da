use ordkit::ds::OrderedMap;
use ordkit::error::OrderedMapError;

fn main() -> Result<(), OrderedMapError> {
    println!(
        "=== OrderedMap: insertion order with stack-style removal ===\n"
    );

    let mut ages = OrderedMap::new();
    ages.push_back("Terry", 52)?;
    ages.push_back("Gary", 10)?;
    ages.push_back("Jim", 34)?;
    println!("After three pushes: {:?} (len {})", ages, ages.len());

    *ages.get_mut("Terry")? += 1;
    println!("Terry after birthday: {}", ages.get("Terry")?);

    let (name, age) = ages.pop_back()?;
    println!("Popped newest: {name}:{age}");
    let (name, age) = ages.pop_back()?;
    println!("Popped newest: {name}:{age}");

    for (name, age) in &ages {
        println!("Remaining: {name}:{age}");
    }

    ages.pop_back()?;
    println!("Empty after draining: {}", ages.is_empty());

    println!("\n--- Error cases ---");
    if let Err(err) = ages.pop_back() {
        println!("pop_back on empty: {err}");
    }
    ages.push_back("Terry", 42)?;
    if let Err(err) = ages.push_back("Terry", 101) {
        println!("duplicate push: {err}");
    }
    if let Err(err) = ages.get("Barry") {
        println!("missing lookup: {err}");
    }

    Ok(())
}
