use std::path::PathBuf;

use clap::Parser;

use crate::calculator::OrderForm;
use crate::config::DopcConfig;

#[derive(Parser, Debug)]
#[command(name = "dopc", version, about = "Delivery Order Price Calculator")]
pub struct Cli {
    #[arg(long, help = "Venue slug, e.g. home-assignment-venue-helsinki")]
    pub venue_slug: Option<String>,

    #[arg(long, help = "Cart value in euros, like 10 or 10.55")]
    pub cart_value: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "User latitude in degrees")]
    pub lat: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "User longitude in degrees")]
    pub lon: Option<String>,

    #[arg(long, help = "Venue API base URL")]
    pub api_url: Option<String>,

    #[arg(long, help = "Config file (TOML)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Output machine-readable JSON")]
    pub json: bool,
}

impl Cli {
    /// Applies the connection flags on top of `config`.
    pub fn apply_to(&self, config: &mut DopcConfig) {
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
    }

    /// The submitted form: flags where given, config defaults otherwise.
    pub fn form(&self, config: &DopcConfig) -> OrderForm {
        let defaults = &config.defaults;
        OrderForm {
            venue_slug: self.venue_slug.clone().unwrap_or_else(|| defaults.venue_slug.clone()),
            cart_value: self.cart_value.clone().unwrap_or_else(|| defaults.cart_value.clone()),
            user_latitude: self.lat.clone().unwrap_or_else(|| defaults.user_latitude.clone()),
            user_longitude: self.lon.clone().unwrap_or_else(|| defaults.user_longitude.clone()),
        }
    }
}
