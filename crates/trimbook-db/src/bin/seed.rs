//! # Seed Data Generator
//!
//! Populates a database with a demo salon for development: two currencies,
//! two registers, barbers with commission rules, a service catalog,
//! inventory, and a month of bookkeeping activity.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p trimbook-db --bin seed
//!
//! # Specify database path
//! cargo run -p trimbook-db --bin seed -- --db ./data/trimbook.db
//!
//! # Or via environment
//! TRIMBOOK_DB=./data/trimbook.db cargo run -p trimbook-db --bin seed
//! ```
//!
//! After seeding, the financial summary and barber balances are printed so
//! the numbers can be eyeballed against the records.

use std::env;

use chrono::{DateTime, NaiveDate, Utc};
use tracing_subscriber::EnvFilter;

use trimbook_core::{
    DateRange, ExchangeRate, Money, NewItem, NewItemPurchase, NewItemUsed, NewPayment, NewShave,
    NewTransaction, ShaveStatus, TransactionKind,
};
use trimbook_db::{Database, DbConfig};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,trimbook=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ts(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    date(y, m, d).and_hms_opt(h, 0, 0).unwrap().and_utc()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("TRIMBOOK_DB").unwrap_or_else(|_| String::from("./trimbook_dev.db"));

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Trimbook Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./trimbook_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Trimbook Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.salons().list_active().await?;
    if !existing.is_empty() {
        println!("⚠ Database already has {} salon(s)", existing.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // ===== Salon, currencies, registers =====

    let salon = db
        .salons()
        .create(
            "Kings Court Barbershop",
            Some("Demo salon with a month of books".to_string()),
            Some("14 Harrow Lane".to_string()),
            Some("+1 555 0188".to_string()),
            None,
        )
        .await?;

    let usd = db
        .salons()
        .add_currency(&salon.id, "USD", "US Dollar", true)
        .await?;
    let eur = db
        .salons()
        .add_currency(&salon.id, "EUR", "Euro", false)
        .await?;

    let front = db.registers().create(&salon.id, "Front Till", &usd.id).await?;
    let back = db.registers().create(&salon.id, "Back Room", &usd.id).await?;

    println!("✓ Salon '{}' with USD (default) and EUR", salon.name);

    // ===== Staff and catalog =====

    let marco = db
        .barbers()
        .create(&salon.id, "Marco Silva", date(2023, 9, 1))
        .await?;
    let denis = db
        .barbers()
        .create(&salon.id, "Denis Oduya", date(2024, 2, 15))
        .await?;

    // Marco got a raise in June: 40% flat, then 45% + 2.00 per shave
    db.barbers()
        .add_commission_rule(&marco.id, 4000, Money::zero(), ts(2024, 1, 1, 0))
        .await?;
    db.barbers()
        .add_commission_rule(&marco.id, 4500, Money::from_cents(200), ts(2024, 6, 1, 0))
        .await?;
    db.barbers()
        .add_commission_rule(&denis.id, 3500, Money::zero(), ts(2024, 2, 15, 0))
        .await?;

    let classic = db
        .catalog()
        .create_hairstyle(&salon.id, "Classic Cut", Money::from_cents(2500), &usd.id)
        .await?;
    let towel_shave = db
        .catalog()
        .create_hairstyle(&salon.id, "Hot Towel Shave", Money::from_cents(1800), &usd.id)
        .await?;
    let fade = db
        .catalog()
        .create_hairstyle(&salon.id, "Skin Fade", Money::from_cents(2800), &usd.id)
        .await?;
    // The fade price went up mid-month; the old tariff stays on record
    db.catalog()
        .set_tariff(&fade.id, Money::from_cents(3000), ts(2024, 6, 15, 0))
        .await?;

    let tom = db
        .clients()
        .create(&salon.id, "Tom Becker", Some("+1 555 0123".to_string()), None)
        .await?;

    println!("✓ 2 barbers, 3 hairstyles, 1 client");

    // ===== Inventory =====

    let bookkeeper = db.bookkeeper();

    let foam = bookkeeper
        .create_item(NewItem {
            salon_id: salon.id.clone(),
            name: "Shave Foam".to_string(),
            price: Money::from_cents(800),
            currency_id: usd.id.clone(),
            exchange_rate: ExchangeRate::ONE,
        })
        .await?;
    let blades = bookkeeper
        .create_item(NewItem {
            salon_id: salon.id.clone(),
            name: "Razor Blades".to_string(),
            price: Money::from_cents(1200),
            currency_id: usd.id.clone(),
            exchange_rate: ExchangeRate::ONE,
        })
        .await?;
    bookkeeper
        .create_item(NewItem {
            salon_id: salon.id.clone(),
            name: "Towels".to_string(),
            price: Money::from_cents(1500),
            currency_id: usd.id.clone(),
            exchange_rate: ExchangeRate::ONE,
        })
        .await?;

    bookkeeper
        .record_item_purchase(NewItemPurchase {
            salon_id: salon.id.clone(),
            item_id: foam.id.clone(),
            cash_register_id: back.id.clone(),
            quantity: 20,
            unit_price: Money::from_cents(150),
            currency_id: usd.id.clone(),
            exchange_rate: ExchangeRate::ONE,
            supplier: Some("Harbor Supply Co".to_string()),
            purchased_on: date(2024, 6, 3),
        })
        .await?;
    bookkeeper
        .record_item_purchase(NewItemPurchase {
            salon_id: salon.id.clone(),
            item_id: blades.id.clone(),
            cash_register_id: back.id.clone(),
            quantity: 50,
            unit_price: Money::from_cents(40),
            currency_id: usd.id.clone(),
            exchange_rate: ExchangeRate::ONE,
            supplier: Some("Harbor Supply Co".to_string()),
            purchased_on: date(2024, 6, 3),
        })
        .await?;

    println!("✓ 3 items, 2 purchases");

    // ===== A month of shaves =====

    let mut shave_count = 0;
    for day in [4, 6, 11, 13, 18, 20, 25] {
        let shave = bookkeeper
            .create_shave(NewShave {
                salon_id: salon.id.clone(),
                barber_id: marco.id.clone(),
                hairstyle_id: classic.id.clone(),
                client_id: Some(tom.id.clone()),
                cash_register_id: front.id.clone(),
                amount: Money::from_cents(2500),
                currency_id: usd.id.clone(),
                exchange_rate: ExchangeRate::ONE,
                status: ShaveStatus::Completed,
                performed_at: ts(2024, 6, day, 10),
            })
            .await?;
        shave_count += 1;

        // Every cut burns a blade; foam on the early ones
        bookkeeper
            .record_item_use(NewItemUsed {
                salon_id: salon.id.clone(),
                item_id: blades.id.clone(),
                shave_id: shave.id.clone(),
                barber_id: marco.id.clone(),
                quantity: 1,
                note: None,
                used_on: date(2024, 6, day),
            })
            .await?;
        if day < 14 {
            bookkeeper
                .record_item_use(NewItemUsed {
                    salon_id: salon.id.clone(),
                    item_id: foam.id.clone(),
                    shave_id: shave.id.clone(),
                    barber_id: marco.id.clone(),
                    quantity: 2,
                    note: None,
                    used_on: date(2024, 6, day),
                })
                .await?;
        }
    }

    for day in [5, 12, 19, 26] {
        bookkeeper
            .create_shave(NewShave {
                salon_id: salon.id.clone(),
                barber_id: denis.id.clone(),
                hairstyle_id: fade.id.clone(),
                client_id: None,
                cash_register_id: front.id.clone(),
                amount: Money::from_cents(if day < 15 { 2800 } else { 3000 }),
                currency_id: usd.id.clone(),
                exchange_rate: ExchangeRate::ONE,
                status: ShaveStatus::Completed,
                performed_at: ts(2024, 6, day, 15),
            })
            .await?;
        shave_count += 1;
    }

    // A tourist paid in euros at the back room register
    bookkeeper
        .create_shave(NewShave {
            salon_id: salon.id.clone(),
            barber_id: denis.id.clone(),
            hairstyle_id: towel_shave.id.clone(),
            client_id: None,
            cash_register_id: back.id.clone(),
            amount: Money::from_cents(2000),
            currency_id: eur.id.clone(),
            exchange_rate: ExchangeRate::from_micros(1_080_000),
            status: ShaveStatus::Completed,
            performed_at: ts(2024, 6, 21, 11),
        })
        .await?;
    shave_count += 1;

    // One booking still open, one that fell through
    bookkeeper
        .create_shave(NewShave {
            salon_id: salon.id.clone(),
            barber_id: marco.id.clone(),
            hairstyle_id: fade.id.clone(),
            client_id: Some(tom.id.clone()),
            cash_register_id: front.id.clone(),
            amount: Money::from_cents(3000),
            currency_id: usd.id.clone(),
            exchange_rate: ExchangeRate::ONE,
            status: ShaveStatus::Scheduled,
            performed_at: ts(2024, 7, 2, 9),
        })
        .await?;
    bookkeeper
        .create_shave(NewShave {
            salon_id: salon.id.clone(),
            barber_id: denis.id.clone(),
            hairstyle_id: classic.id.clone(),
            client_id: None,
            cash_register_id: front.id.clone(),
            amount: Money::from_cents(2500),
            currency_id: usd.id.clone(),
            exchange_rate: ExchangeRate::ONE,
            status: ShaveStatus::Cancelled,
            performed_at: ts(2024, 6, 27, 16),
        })
        .await?;

    println!("✓ {} completed shaves (plus 1 scheduled, 1 cancelled)", shave_count);

    // ===== Payments and transactions =====

    bookkeeper
        .create_payment(NewPayment {
            salon_id: salon.id.clone(),
            barber_id: marco.id.clone(),
            cash_register_id: front.id.clone(),
            amount: Money::from_cents(5000),
            currency_id: usd.id.clone(),
            exchange_rate: ExchangeRate::ONE,
            period_start: date(2024, 6, 1),
            period_end: date(2024, 6, 15),
            paid_on: date(2024, 6, 16),
        })
        .await?;

    bookkeeper
        .create_transaction(NewTransaction {
            salon_id: salon.id.clone(),
            cash_register_id: front.id.clone(),
            name: "Tip jar count".to_string(),
            amount: Money::from_cents(1850),
            currency_id: usd.id.clone(),
            exchange_rate: ExchangeRate::ONE,
            kind: TransactionKind::Income,
            occurred_on: date(2024, 6, 14),
        })
        .await?;
    bookkeeper
        .create_transaction(NewTransaction {
            salon_id: salon.id.clone(),
            cash_register_id: back.id.clone(),
            name: "June rent".to_string(),
            amount: Money::from_cents(12000),
            currency_id: usd.id.clone(),
            exchange_rate: ExchangeRate::ONE,
            kind: TransactionKind::Expense,
            occurred_on: date(2024, 6, 1),
        })
        .await?;

    println!("✓ 1 payment, 2 transactions");

    // ===== Show the books =====

    let june = DateRange::month(2024, 6).expect("valid month");
    let summary = db.reports().financial_summary(&salon.id, &june).await?;

    println!();
    println!("June summary:");
    println!("{}", serde_json::to_string_pretty(&summary)?);

    println!();
    println!("Register balances:");
    for register in db.registers().list(&salon.id).await? {
        let balances = db.ledger().balances(&register.id).await?;
        println!(
            "  {:<12} profit {:>10}  cash {:>10}",
            register.name,
            balances.profit.to_decimal(),
            balances.cash.to_decimal()
        );
    }

    println!();
    println!("Barber balances (June):");
    for barber in db.barbers().list(&salon.id).await? {
        let owed = db.reports().barber_balance(&barber.id, &june).await?;
        println!("  {:<12} owed {}", barber.full_name, owed.to_decimal());
    }

    let low = db.reports().low_stock_items(&salon.id, None).await?;
    if !low.is_empty() {
        println!();
        println!("Low stock:");
        for item in low {
            println!("  {:<12} {} left", item.name, item.current_stock);
        }
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
