//! Menu listing command

use crate::config::Config;
use crate::error::{GarcomError, Result};
use crate::menu::Dish;
use crate::providers::{self, DishCatalog};
use prettytable::{row, Table};

/// Lists the dishes of the configured restaurant
///
/// # Errors
///
/// Returns an error if no restaurant is selected or the backend call fails.
pub async fn run_menu(config: &Config, json: bool) -> Result<()> {
    let restaurant_id = config
        .restaurant
        .id
        .as_deref()
        .ok_or(GarcomError::MissingRestaurant)?;

    let backend = providers::create_backend(&config.backend)?;
    let dishes = backend.dishes_for_restaurant(restaurant_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dishes)?);
    } else {
        print_dish_table(&dishes);
    }
    Ok(())
}

fn print_dish_table(dishes: &[Dish]) {
    let mut table = Table::new();
    table.add_row(row!["ID", "PRATO", "DESCRIÇÃO", "PREÇO"]);
    for dish in dishes {
        table.add_row(row![
            dish.id,
            dish.name,
            dish.description,
            format!("R$ {:.2}", dish.price)
        ]);
    }
    table.printstd();
}
