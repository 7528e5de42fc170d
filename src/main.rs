use std::time::Duration;

use tracing::{info, span, Level};

mod adapters;
mod fetch;
mod model;
mod util;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().json().init();

    let span = span!(Level::INFO, "main", context = "main");
    let _e = span.enter();
    info!("called");

    let matches = clap::Command::new("drivemeta")
        .arg(clap::Arg::new("DRIVE_URI").required(true).index(1))
        .arg(clap::Arg::new("ITEM_IDS").num_args(0..).index(2))
        .arg(
            clap::Arg::new("deadline-secs")
                .long("deadline-secs")
                .value_parser(clap::value_parser!(u64)),
        )
        .get_matches();

    let drive_uri = matches.get_one::<String>("DRIVE_URI").unwrap();
    let item_ids: Vec<String> = matches
        .get_many::<String>("ITEM_IDS")
        .map(|ids| ids.cloned().collect())
        .unwrap_or_default();
    info!(drive_uri = %drive_uri, total = item_ids.len(), "args");

    let user = util::uri::parse_user_from_uri(drive_uri).unwrap();

    let access_token =
        std::env::var("ONEDRIVE_ACCESS_TOKEN").expect("ONEDRIVE_ACCESS_TOKEN must be set");
    let endpoint = std::env::var("ONEDRIVE_ENDPOINT")
        .unwrap_or_else(|_| adapters::graph::DEFAULT_ENDPOINT.to_string());
    let ctx = model::drive::DriveContext::new(&endpoint, &access_token);

    let client = adapters::graph::GraphClient::new().unwrap();
    let fetcher = fetch::DriveFetcher::new(Box::new(client)).with_status_map(
        model::drive::StatusMap::default().with(model::drive::ErrorKind::RateLimited, 429),
    );

    drop(_e);

    let res = match matches.get_one::<u64>("deadline-secs") {
        Some(secs) => {
            fetcher
                .fetch_file_info_deadline(&ctx, &user, Some(&item_ids), Duration::from_secs(*secs))
                .await
        }
        None => fetcher.fetch_file_info(&ctx, &user, Some(&item_ids)).await,
    };

    let infos = res.unwrap();
    for item in infos {
        println!("{}", serde_json::to_string(&item).unwrap());
    }
}
