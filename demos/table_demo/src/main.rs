//! Walkthrough of the gridflux engine over an in-memory client roster.
//!
//! Loads (or seeds) the column configuration from a JSON file in the system
//! temp directory, then runs the full loop: query pipeline, dropdown filter,
//! column reorder, inline cell edit, record form, CSV export, save.
//!
//! Usage:
//!   cargo run --bin table-demo -- [--page-size <n>]

use gridflux_core::chrono::NaiveDate;
use gridflux_core::{
    ColumnConfigStore, EditSession, FieldSchema, FileConfigStore, MemoryRecordStore, QueryParams,
    Record, RecordForm, RecordStore, ReorderController, SortKey, Value,
};
use gridflux_export::{CsvExporter, Exporter};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();

    let config_path = std::env::temp_dir().join("gridflux-demo-columns.json");
    let persistence = FileConfigStore::from_path(config_path.clone());

    let mut columns = ColumnConfigStore::load_from(&persistence).unwrap_or_else(|error| {
        eprintln!("Failed to load column configuration: {error}");
        std::process::exit(1);
    });
    log::info!("Loaded {} columns from {:?}", columns.len(), config_path);

    let store = MemoryRecordStore::with_records(sample_records());
    let roster = store.list().unwrap_or_else(|error| {
        eprintln!("Failed to list records: {error}");
        std::process::exit(1);
    });

    // Browse the roster sorted by visit count.
    let mut params = QueryParams::default()
        .with_search_fields(columns.search_fields())
        .with_sort(SortKey::desc("visits"))
        .with_page_size(args.page_size);

    let window = params.run(&roster);
    println!("== Roster by visits ==");
    print_table(&columns.visible_columns(), &window.records);
    println!(
        "page 1 of {} ({} records)\n",
        window.total_pages, window.total_count
    );

    // Narrow with the status dropdown plus a text search.
    params.set_filter("status", "active");
    params = params.with_search("an");
    let window = params.run(&roster);
    params.clamp_page(window.total_pages);

    println!("== Active clients matching \"an\" ==");
    print_table(&columns.visible_columns(), &window.records);
    println!("{} records match\n", window.total_count);

    // Drag the email column two slots to the right.
    let mut controller = ReorderController::new();
    controller.drag_start(1);
    if controller.drag_over(3) {
        if let Some(swap) = controller.drop_on(3) {
            swap.apply(&mut columns);
            log::info!(
                "Moved column {} -> {}",
                swap.from_index,
                swap.to_index
            );
        }
    }
    println!("== Column order after drag ==");
    let order: Vec<&str> = columns
        .visible_columns()
        .iter()
        .map(|field| field.label.as_str())
        .collect();
    println!("{}\n", order.join(" | "));

    // Inline edit: bump the first record's visit count.
    let target = &roster[0];
    if let Some(field) = columns.get_by_name("visits").cloned() {
        let mut session = EditSession::new(
            &field,
            target.attribute("visits").cloned().unwrap_or(Value::Null),
        );
        session.begin_edit();
        session.set_draft("13");

        if let Some(pending) = session.commit() {
            let outcome = store.update(target.id, pending.patch());
            session.resolve_save(pending.token, outcome);
        }

        println!("== Inline edit ==");
        println!(
            "{} now shows {} ({:?})\n",
            target.form_value("name"),
            session.displayed_value(),
            session.status()
        );
    }

    // Record form: a failed submit surfaces messages, a fixed one creates.
    let form_fields: Vec<FieldSchema> = columns
        .visible_columns()
        .into_iter()
        .cloned()
        .collect();
    let mut form = RecordForm::create(form_fields);
    form.set_value("email", "dana.example.com");

    println!("== New client form ==");
    if form.submit(&store).is_err() {
        for descriptor in form.form_fields() {
            if let Some(message) = &descriptor.error {
                println!("  {}: {}", descriptor.label, message);
            }
        }
    }

    form.set_value("name", "Dana Wolfe");
    form.set_value("email", "dana@example.com");
    form.set_value("visits", "1");
    match form.submit(&store) {
        Ok(record) => log::info!("Created record {}", record.id),
        Err(error) => log::error!("Create failed: {error}"),
    }
    println!();

    // Export the current window as CSV.
    let window = params.run(&store.list().unwrap_or_default());
    let mut csv_buf = Vec::new();
    if let Err(error) = CsvExporter.export(&columns.visible_columns(), &window.records, &mut csv_buf)
    {
        eprintln!("Export failed: {error}");
        std::process::exit(1);
    }
    println!("== CSV export ==");
    println!("{}", String::from_utf8_lossy(&csv_buf));

    // Persist the layout so the next run starts from the dragged order.
    if columns.save(&persistence).is_ok() {
        log::info!("Column layout saved to {:?}", config_path);
    }
}

fn print_table(columns: &[&FieldSchema], records: &[Record]) {
    let mut widths: Vec<usize> = columns.iter().map(|field| field.label.len()).collect();
    for record in records {
        for (index, field) in columns.iter().enumerate() {
            widths[index] = widths[index].max(record.form_value(&field.name).len());
        }
    }

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(field, &width)| format!("{:<width$}", field.label))
        .collect();
    println!("{}", header.join("  "));

    for record in records {
        let cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(field, &width)| format!("{:<width$}", record.form_value(&field.name)))
            .collect();
        println!("{}", cells.join("  "));
    }
}

fn client(
    name: &str,
    email: &str,
    phone: &str,
    pricing: &str,
    visits: i64,
    last_visit: &str,
    staff: &str,
    status: &str,
) -> Record {
    let date = NaiveDate::parse_from_str(last_visit, "%Y-%m-%d").unwrap_or_default();

    Record::new()
        .with_attribute("name", Value::Text(name.to_string()))
        .with_attribute("email", Value::Text(email.to_string()))
        .with_attribute("phone", Value::Text(phone.to_string()))
        .with_attribute("pricing_option", Value::Text(pricing.to_string()))
        .with_attribute("visits", Value::Int(visits))
        .with_attribute("last_visit", Value::Date(date))
        .with_attribute("staff", Value::Text(staff.to_string()))
        .with_attribute("status", Value::Text(status.to_string()))
}

fn sample_records() -> Vec<Record> {
    vec![
        client(
            "Alice Lang",
            "alice@example.com",
            "555-0101",
            "Premium",
            12,
            "2024-03-15",
            "Erin",
            "active",
        ),
        client(
            "Bruno Mata",
            "bruno@example.com",
            "555-0102",
            "Trial",
            3,
            "2024-01-08",
            "Erin",
            "inactive",
        ),
        client(
            "Carla Reyes",
            "carla@example.com",
            "555-0103",
            "Standard",
            7,
            "2024-02-27",
            "Malik",
            "active",
        ),
        client(
            "Dan Okafor",
            "dan@example.com",
            "555-0104",
            "Standard",
            7,
            "2024-03-01",
            "Malik",
            "inactive",
        ),
        client(
            "Hanna Berg",
            "hanna@example.com",
            "555-0105",
            "Premium",
            22,
            "2024-03-20",
            "Erin",
            "active",
        ),
        client(
            "Ivan Sousa",
            "ivan@example.com",
            "555-0106",
            "Basic",
            5,
            "2024-02-02",
            "Priya",
            "active",
        ),
        client(
            "Jana Novak",
            "jana@example.com",
            "555-0107",
            "Basic",
            1,
            "2023-12-19",
            "Priya",
            "inactive",
        ),
        client(
            "Santiago Vidal",
            "santiago@example.com",
            "555-0108",
            "Premium",
            16,
            "2024-03-18",
            "Malik",
            "active",
        ),
    ]
}

struct Args {
    page_size: usize,
}

fn parse_args() -> Args {
    let mut args = std::env::args().skip(1);
    let mut page_size = 5;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--page-size" => {
                page_size = args
                    .next()
                    .and_then(|value| value.parse().ok())
                    .unwrap_or_else(|| {
                        eprintln!("--page-size expects a number");
                        std::process::exit(1);
                    });
            }
            "--help" | "-h" => {
                println!("Table engine walkthrough");
                println!();
                println!("Usage: table-demo [--page-size <n>]");
                println!();
                println!("Options:");
                println!("  --page-size <n>  Records per page (default 5)");
                println!("  --help, -h       Show this help");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
    }

    Args { page_size }
}
