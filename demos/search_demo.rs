//! Search example: seed an in-memory store, then run AND, orlike and
//! paginated queries through a `RecordService`.
//!
//! ```sh
//! RUST_LOG=crudbase=debug cargo run --example search_demo
//! ```

use crudbase::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Car {
    id: Uuid,
    name: String,
    brand: String,
    year: i64,
    color: Option<String>,
}

impl Record for Car {
    fn resource_name() -> &'static str {
        "cars"
    }

    fn id(&self) -> Uuid {
        self.id
    }
}

fn car(name: &str, brand: &str, year: i64, color: Option<&str>) -> Car {
    Car {
        id: Uuid::new_v4(),
        name: name.to_string(),
        brand: brand.to_string(),
        year,
        color: color.map(str::to_string),
    }
}

fn print_page(title: &str, envelope: &Envelope<Page<Car>>) {
    println!("\n🔎 {} -> code={} message={}", title, envelope.code, envelope.message);
    if let Some(page) = &envelope.data {
        println!("   total: {}", page.total);
        for car in &page.list {
            println!("   - {} ({}, {})", car.name, car.brand, car.year);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🚀 crudbase search demo");

    let service: RecordService<Car> =
        RecordService::new(Arc::new(InMemoryRecordStore::<Car>::new()));

    let fleet = vec![
        car("Model 3", "Tesla", 2024, Some("red")),
        car("330i", "BMW", 2023, None),
        car("Model Y", "Tesla", 2022, Some("white")),
        car("i4", "BMW", 2024, Some("blue")),
        car("Golf", "Volkswagen", 2019, None),
    ];
    for c in fleet.iter().cloned() {
        service.add(c).await?;
    }
    println!("✅ Added {} cars", fleet.len());

    // AND mode: every clause must hold
    let recent_teslas = SearchRequest::new()
        .filter("brand", Operator::Eq, "Tesla")
        .filter("year", Operator::Egt, 2023)
        .order_by("year desc");
    print_page("recent Teslas", &service.find(&recent_teslas).await?);

    // orlike: one value across several columns, other clauses ignored
    let model_search = SearchRequest::new()
        .filter("name,brand", Operator::OrLike, "Model")
        .filter("year", Operator::Lt, 2000);
    print_page("'Model' in name or brand", &service.find(&model_search).await?);

    let uncolored = SearchRequest::new().filter("color", Operator::IsNull, FieldValue::Null);
    print_page("no color on file", &service.find(&uncolored).await?);

    // The same request as a client would send it
    let paged: SearchRequest = serde_json::from_str(
        r#"{"searchCondition": [], "orderCondition": "name asc", "pageIndex": 2, "pageSize": 2}"#,
    )?;
    print_page("page 2 by name", &service.find(&paged).await?);

    let golf = &fleet[4];
    let deleted = service.delete(&golf.id).await?;
    println!("\n🗑️  {}: {:?}", deleted.message, deleted.data);

    let lookup = service.find_by_id(&golf.id).await?;
    println!("🔍 lookup after delete: {}", serde_json::to_string(&lookup)?);

    Ok(())
}
