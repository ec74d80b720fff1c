#[macro_use]
extern crate log;

use std::env;

use clap::Parser;

mod checker;
mod cli;
mod model;
mod report;
mod store;
mod track;

use cli::{Cli, Command};
use store::Store;

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use log4rs::append::console::{ConsoleAppender, Target};
    use log4rs::config::{Appender, Config, Root};
    use log4rs::encode::pattern::PatternEncoder;

    let level = env::var("MANGA_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(log::LevelFilter::Info);

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging()?;

    let args = Cli::parse();
    let db_path = env::var("MANGA_DB").unwrap_or_else(|_| String::from(store::DEFAULT_DB_FILE));
    let mut store = Store::load(&db_path)?;

    match args.command {
        Some(Command::Count) => println!("{}", store.records.len()),
        Some(Command::List { latest }) => report::print_list(&store.records, latest),
        Some(Command::Add { urls }) => {
            for url in urls {
                match track::record_from_url(&url) {
                    Ok((name, record)) => {
                        info!("Now tracking {}", name);
                        store.records.insert(name, record);
                    }
                    Err(e) => error!("{}", e),
                }
            }
            store.save()?;
        }
        Some(Command::Remove { title }) => {
            if store.records.remove(&title).is_some() {
                info!("Stopped tracking {}", title);
                store.save()?;
            } else {
                warn!("Not tracking any manga called {}", title);
            }
        }
        Some(Command::Check) | None => {
            let events = checker::reconcile_all(&mut store.records).await;
            for event in &events {
                println!("{}", event);
            }
            store.save()?;
        }
    }

    Ok(())
}
