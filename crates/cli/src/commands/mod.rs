//! CLI command implementations.

#![allow(clippy::print_stdout)] // printing is this binary's job

use std::io::Read;

use grocerly_client::cart::Cart;
use grocerly_client::config::ClientConfig;
use grocerly_client::delivery;
use grocerly_client::storage::MemoryStore;
use grocerly_client::Client;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn client() -> Result<Client<MemoryStore>, Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    Ok(Client::new(config, MemoryStore::new())?)
}

/// Print the next selectable delivery dates.
///
/// With `--active`, the schedule is forced locally and the backend is not
/// contacted at all.
pub async fn delivery_days(active_override: Option<&str>) -> CommandResult {
    let days = match active_override {
        Some(raw) => {
            let numbers = parse_weekday_numbers(raw)?;
            let active = delivery::weekdays_from_numbers(&numbers);
            delivery::delivery_days(chrono_today(), &active)
        }
        None => client()?.delivery().upcoming_days().await,
    };

    if days.is_empty() {
        println!("No delivery dates available in the next 30 days.");
        return Ok(());
    }
    for day in days {
        let marker = if day.is_closest { " (closest)" } else { "" };
        println!("{}  {}{marker}", day.iso_date, day.label);
    }
    Ok(())
}

/// Geocode an address and print the candidates.
pub async fn geocode(address: &str) -> CommandResult {
    let client = client()?;
    let results = client.geocoder().forward(address).await?;
    for result in results {
        println!(
            "{:.6},{:.6}  {}",
            result.latitude, result.longitude, result.formatted_address
        );
    }
    Ok(())
}

/// Read a JSON cart from stdin and print its totals.
pub fn price() -> CommandResult {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    let cart: Cart = serde_json::from_str(&input)?;
    let totals = cart.totals();

    println!("subtotal:            {}", totals.subtotal);
    println!("after item offers:   {}", totals.discounted_subtotal);
    println!("promotion discount:  {}", totals.promo_discount);
    println!("total:               {}", totals.total);
    Ok(())
}

fn chrono_today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

fn parse_weekday_numbers(raw: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    raw.split(',')
        .map(|part| part.trim().parse::<u8>().map_err(Into::into))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_weekday_numbers() {
        assert_eq!(parse_weekday_numbers("1,4").unwrap(), vec![1, 4]);
        assert_eq!(parse_weekday_numbers(" 2 , 7 ").unwrap(), vec![2, 7]);
        assert!(parse_weekday_numbers("mon").is_err());
    }
}
