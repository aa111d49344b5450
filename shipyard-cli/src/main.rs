#![deny(missing_docs)]
//! Shipyard command-line interface.
//!
//! Lists, counts and edits ships through a running Shipyard server.

mod client;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use client::ShipQuery;
use shipyard_core::{Ship, ShipDraft, ShipOrder, ShipType, round_half_up, validate_ship};

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "shipyard", version, about = "Shipyard CLI")]
struct Cli {
    /// Base URL of the Shipyard server.
    #[arg(
        long,
        global = true,
        env = "SHIPYARD_SERVER_URL",
        default_value = "http://127.0.0.1:8080"
    )]
    server: String,
    /// Output format for ship data.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Clone, Debug, Default)]
struct FilterArgs {
    /// Substring of the ship name.
    #[arg(long)]
    name: Option<String>,
    /// Substring of the planet.
    #[arg(long)]
    planet: Option<String>,
    /// Ship type (TRANSPORT, MILITARY, MERCHANT).
    #[arg(long, value_parser = parse_ship_type)]
    ship_type: Option<ShipType>,
    /// Keep ships produced in this year or later.
    #[arg(long)]
    after_year: Option<i32>,
    /// Keep ships produced before this year.
    #[arg(long)]
    before_year: Option<i32>,
    /// Keep only used (true) or new (false) ships.
    #[arg(long)]
    used: Option<bool>,
    /// Minimum speed.
    #[arg(long)]
    min_speed: Option<f64>,
    /// Maximum speed.
    #[arg(long)]
    max_speed: Option<f64>,
    /// Minimum crew size.
    #[arg(long)]
    min_crew_size: Option<i32>,
    /// Maximum crew size.
    #[arg(long)]
    max_crew_size: Option<i32>,
    /// Minimum rating.
    #[arg(long)]
    min_rating: Option<f64>,
    /// Maximum rating.
    #[arg(long)]
    max_rating: Option<f64>,
}

#[derive(Args, Clone, Debug, Default)]
struct ShipFields {
    /// Ship name.
    #[arg(long)]
    name: Option<String>,
    /// Home planet.
    #[arg(long)]
    planet: Option<String>,
    /// Ship type (TRANSPORT, MILITARY, MERCHANT).
    #[arg(long, value_parser = parse_ship_type)]
    ship_type: Option<ShipType>,
    /// Production year.
    #[arg(long)]
    prod_year: Option<i32>,
    /// Whether the ship is second-hand.
    #[arg(long)]
    used: Option<bool>,
    /// Speed between 0.01 and 0.99.
    #[arg(long)]
    speed: Option<f64>,
    /// Crew size between 1 and 9999.
    #[arg(long)]
    crew_size: Option<i32>,
}

#[derive(Subcommand)]
enum Commands {
    /// List a page of ships matching the filters.
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Sort key (ID, SPEED, DATE, RATING).
        #[arg(long, value_parser = parse_order)]
        order: Option<ShipOrder>,
        /// Zero-based page index.
        #[arg(long)]
        page_number: Option<u32>,
        /// Ships per page.
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Count ships matching the filters.
    Count {
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show one ship.
    Get {
        /// Ship identifier.
        id: String,
    },
    /// Create a ship.
    Create {
        #[command(flatten)]
        fields: ShipFields,
    },
    /// Update the given fields of a ship.
    Update {
        /// Ship identifier.
        id: String,
        #[command(flatten)]
        fields: ShipFields,
    },
    /// Delete a ship.
    Delete {
        /// Ship identifier.
        id: String,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    use client::ShipyardClient;
    use shipyard_core::PageRequest;

    let cli = Cli::parse();
    let client = ShipyardClient::new(&cli.server)?;
    let format = cli.format;

    match cli.command {
        Commands::List {
            filters,
            order,
            page_number,
            page_size,
        } => {
            let page = (page_number.is_some() || page_size.is_some())
                .then(|| PageRequest::new(page_number, page_size));
            let ships = client.list(&filters.to_query()?, order, page).await?;
            println!("{}", render_ships(&ships, format)?);
        }
        Commands::Count { filters } => {
            let count = client.count(&filters.to_query()?).await?;
            println!("{count}");
        }
        Commands::Get { id } => {
            let ship = client.get(&id).await?;
            println!("{}", render_ships(&[ship], format)?);
        }
        Commands::Create { fields } => {
            let draft = fields.to_new_draft()?;
            let ship = client.create(&draft).await?;
            println!("{}", render_ships(&[ship], format)?);
        }
        Commands::Update { id, fields } => {
            let ship = client.update(&id, &fields.to_draft()?).await?;
            println!("{}", render_ships(&[ship], format)?);
        }
        Commands::Delete { id } => {
            client.delete(&id).await?;
            println!("Deleted ship {id}.");
        }
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

fn parse_ship_type(raw: &str) -> Result<ShipType, String> {
    raw.to_ascii_uppercase()
        .parse()
        .map_err(|err: shipyard_core::ShipyardError| err.to_string())
}

fn parse_order(raw: &str) -> Result<ShipOrder, String> {
    raw.to_ascii_uppercase()
        .parse()
        .map_err(|err: shipyard_core::ShipyardError| err.to_string())
}

fn year_start(year: i32) -> CliResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| format!("year {year} is out of range").into())
}

impl FilterArgs {
    fn to_query(&self) -> CliResult<ShipQuery> {
        let after = self.after_year.map(year_start).transpose()?;
        let before = self.before_year.map(year_start).transpose()?;
        let mut query = ShipQuery::default();
        query
            .push("name", self.name.as_deref())
            .push("planet", self.planet.as_deref())
            .push("shipType", self.ship_type)
            .push("after", after.map(|date| date.timestamp_millis()))
            .push("before", before.map(|date| date.timestamp_millis()))
            .push("isUsed", self.used)
            .push("minSpeed", self.min_speed)
            .push("maxSpeed", self.max_speed)
            .push("minCrewSize", self.min_crew_size)
            .push("maxCrewSize", self.max_crew_size)
            .push("minRating", self.min_rating)
            .push("maxRating", self.max_rating);
        Ok(query)
    }
}

impl ShipFields {
    fn to_draft(&self) -> CliResult<ShipDraft> {
        Ok(ShipDraft {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self.ship_type,
            prod_date: self.prod_year.map(year_start).transpose()?,
            is_used: self.used,
            speed: self.speed,
            crew_size: self.crew_size,
        })
    }

    /// Draft for a new ship, checked locally before it reaches the server.
    fn to_new_draft(&self) -> CliResult<ShipDraft> {
        let mut draft = self.to_draft()?;
        draft.speed = draft.speed.map(round_half_up);
        validate_ship(&draft)?;
        Ok(draft)
    }
}

fn render_ship(ship: &Ship) -> String {
    format!(
        "#{} {} [{}] planet={} year={} speed={:.2} crew={} used={} rating={:.2}",
        ship.id,
        ship.name,
        ship.ship_type,
        ship.planet,
        ship.prod_date.year(),
        ship.speed,
        ship.crew_size,
        ship.is_used,
        ship.rating
    )
}

fn render_ships(ships: &[Ship], format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(ships)?),
        OutputFormat::Text if ships.is_empty() => Ok("No ships found.".to_string()),
        OutputFormat::Text => Ok(ships
            .iter()
            .map(render_ship)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn enterprise() -> Ship {
        Ship {
            id: 1,
            name: "Enterprise".to_string(),
            planet: "Earth".to_string(),
            ship_type: ShipType::Military,
            prod_date: year_start(3000).expect("year"),
            is_used: false,
            speed: 0.5,
            crew_size: 100,
            rating: 2.0,
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_arguments_parse() {
        let cli = Cli::try_parse_from([
            "shipyard",
            "list",
            "--ship-type",
            "merchant",
            "--min-speed",
            "0.6",
            "--order",
            "rating",
            "--page-size",
            "5",
        ])
        .expect("parse list");

        match cli.command {
            Commands::List {
                filters,
                order,
                page_size,
                page_number,
            } => {
                assert_eq!(filters.ship_type, Some(ShipType::Merchant));
                assert_eq!(filters.min_speed, Some(0.6));
                assert_eq!(order, Some(ShipOrder::Rating));
                assert_eq!(page_size, Some(5));
                assert_eq!(page_number, None);
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn unknown_order_is_rejected() {
        assert!(Cli::try_parse_from(["shipyard", "list", "--order", "NAME"]).is_err());
    }

    #[test]
    fn filter_years_become_epoch_millis() {
        let filters = FilterArgs {
            after_year: Some(3000),
            used: Some(true),
            ..FilterArgs::default()
        };
        let mut expected = ShipQuery::default();
        expected
            .push("after", Some(32503680000000_i64))
            .push("isUsed", Some(true));

        assert_eq!(filters.to_query().expect("query"), expected);
    }

    #[test]
    fn fields_build_partial_draft() {
        let fields = ShipFields {
            used: Some(true),
            prod_year: Some(2999),
            ..ShipFields::default()
        };
        let draft = fields.to_draft().expect("draft");

        assert_eq!(draft.is_used, Some(true));
        assert_eq!(draft.prod_date.map(|date| date.year()), Some(2999));
        assert!(draft.name.is_none());
    }

    #[test]
    fn new_draft_rounds_speed_and_rejects_incomplete_fields() {
        let fields = ShipFields {
            name: Some("Enterprise".to_string()),
            planet: Some("Earth".to_string()),
            ship_type: Some(ShipType::Military),
            prod_year: Some(3000),
            used: None,
            speed: Some(0.455),
            crew_size: Some(100),
        };
        let draft = fields.to_new_draft().expect("valid draft");
        assert_eq!(draft.speed, Some(0.46));

        let incomplete = ShipFields {
            crew_size: None,
            ..fields
        };
        let err = incomplete.to_new_draft().expect_err("missing crew");
        assert!(err.to_string().contains("crewSize"));
    }

    #[test]
    fn text_rendering_lists_key_fields() {
        let rendered = render_ships(&[enterprise()], OutputFormat::Text).expect("render");

        assert_eq!(
            rendered,
            "#1 Enterprise [MILITARY] planet=Earth year=3000 speed=0.50 crew=100 used=false rating=2.00"
        );
        assert_eq!(
            render_ships(&[], OutputFormat::Text).expect("render"),
            "No ships found."
        );
    }

    #[test]
    fn json_rendering_uses_wire_names() {
        let rendered = render_ships(&[enterprise()], OutputFormat::Json).expect("render");

        assert!(rendered.contains("\"crewSize\": 100"));
        assert!(rendered.contains("\"shipType\": \"MILITARY\""));
    }
}
