//! `hrms` — inspect navigation decisions and check-in distances from a shell.
//!
//! ```text
//! hrms navigate <path>...
//! hrms whoami
//! hrms logout
//! hrms distance <lat1> <lon1> <lat2> <lon2>
//! ```

use anyhow::{bail, Context};

use hrms_app::{AppConfig, AppContext};
use hrms_attendance::Coordinates;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    hrms_observability::init(config.log_format);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!("usage: hrms <navigate|whoami|logout|distance> [args...]");
    };

    match command.as_str() {
        "navigate" => {
            let mut ctx = AppContext::bootstrap(config)?;
            if rest.is_empty() {
                let navigation = ctx.check_auth()?;
                println!("{}", serde_json::to_string(&navigation)?);
            }
            for location in rest {
                let navigation = ctx.navigate(location)?;
                println!("{}", serde_json::to_string(&navigation)?);
            }
        }
        "whoami" => {
            let ctx = AppContext::bootstrap(config)?;
            match ctx.session().user() {
                Some(user) => println!("{}", serde_json::to_string(user)?),
                None => println!("anonymous"),
            }
        }
        "logout" => {
            let mut ctx = AppContext::bootstrap(config)?;
            let navigation = ctx.logout()?;
            println!("{}", serde_json::to_string(&navigation)?);
        }
        "distance" => {
            let [lat1, lon1, lat2, lon2] = parse_degrees(rest)?;
            let from = Coordinates::new(lat1, lon1)?;
            let to = Coordinates::new(lat2, lon2)?;
            println!("{:.1}", from.distance_to(&to));
        }
        other => bail!("unknown command {other:?}"),
    }

    Ok(())
}

fn parse_degrees(args: &[String]) -> anyhow::Result<[f64; 4]> {
    let values = args
        .iter()
        .map(|a| a.parse::<f64>().with_context(|| format!("{a:?} is not a number")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    match <[f64; 4]>::try_from(values) {
        Ok(degrees) => Ok(degrees),
        Err(values) => bail!("distance needs 4 numbers, got {}", values.len()),
    }
}
