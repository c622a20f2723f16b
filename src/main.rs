use chrono::Local;
use hh_vacancies::{config::ParserConfig, info_time, log, process::process_site, Result};

#[tokio::main]
async fn main() -> Result<()> {
    log::init_tracing();
    let logger = log::Logger::new("hh_vacancies");

    let start_time = Local::now();
    let config = ParserConfig::default();
    info_time!(logger, "Searching for {:?}, {} vacancies", config.query, config.count);

    let outcome = process_site(config, logger.clone()).await?;
    info_time!(
        logger,
        start_time,
        "Full program time: {} vacancies parsed",
        outcome.vacancies.len()
    );

    Ok(())
}
