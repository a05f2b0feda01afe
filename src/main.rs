mod conditions;
mod report;

use bridgex::{analyze, Params, ScenarioDescriptor};
use conditions::{build_pratt_truss, PrattProperties};
use log::info;
use report::render_summary;
use thiserror::Error;

/// Scenario analysed when none is given: ten panels, 4 m clearance, simple
/// supports.
const DEFAULT_SCENARIO: &str = "1100400000";

/// Problems with the command line.
#[derive(Debug, Error)]
enum UsageError {
    /// A flag that needs a value came last.
    #[error("{0} expects a value")]
    MissingValue(&'static str),
    /// The site cost is not a number.
    #[error("site cost {0:?} is not a number")]
    BadSiteCost(String),
    /// Anything else starting with a dash.
    #[error("unknown option {0}; usage: bridgex [SCENARIO_CODE] [--site-cost N] [--params FILE] [--json]")]
    UnknownOption(String),
}

/// Parsed command line.
#[derive(Debug, Default)]
struct Options {
    /// Ten-digit scenario code.
    scenario: Option<String>,
    /// Site preparation cost in dollars.
    site_cost: f64,
    /// JSON catalog replacing the standard parameters.
    params: Option<String>,
    /// Print the full report as JSON instead of text.
    json: bool,
}

/// Read options from the process arguments.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, UsageError> {
    let mut options = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--site-cost" => {
                let value = args.next().ok_or(UsageError::MissingValue("--site-cost"))?;
                options.site_cost = value
                    .parse()
                    .map_err(|_| UsageError::BadSiteCost(value.clone()))?;
            }
            "--params" => {
                options.params = Some(args.next().ok_or(UsageError::MissingValue("--params"))?);
            }
            "--json" => options.json = true,
            flag if flag.starts_with('-') => {
                return Err(UsageError::UnknownOption(flag.to_string()))
            }
            code => options.scenario = Some(code.to_string()),
        }
    }
    Ok(options)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let options = parse_args(std::env::args().skip(1))?;

    // The catalog fixes materials, shapes and load cases for every design.
    let params = match &options.params {
        Some(path) => Params::from_json(&std::fs::read_to_string(path)?)?,
        None => Params::default(),
    };

    // Decode the site and lay a Pratt truss over its deck.
    let code = options.scenario.as_deref().unwrap_or(DEFAULT_SCENARIO);
    let descriptor = ScenarioDescriptor::parse(code, options.site_cost)?;
    let cross_section = PrattProperties::default().cross_section()?;
    let truss = build_pratt_truss(&descriptor, cross_section)?;
    info!(
        "built {} joints and {} members for scenario {code}",
        truss.joint_count(),
        truss.member_count()
    );

    // Roll the truck across and rate every member.
    let report = analyze(&truss, &descriptor.load_scenario(), &params);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_summary(&descriptor, &report));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|arg| (*arg).to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_every_option() {
        let options = parse_args(args(&[
            "--json",
            "2050812100",
            "--site-cost",
            "45000",
            "--params",
            "catalog.json",
        ]))
        .expect("valid command line");
        assert!(options.json);
        assert_eq!(options.scenario.as_deref(), Some("2050812100"));
        assert_eq!(options.site_cost, 45_000.0);
        assert_eq!(options.params.as_deref(), Some("catalog.json"));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            parse_args(args(&["--site-cost"])),
            Err(UsageError::MissingValue("--site-cost"))
        ));
        assert!(matches!(
            parse_args(args(&["--site-cost", "lots"])),
            Err(UsageError::BadSiteCost(_))
        ));
        assert!(matches!(
            parse_args(args(&["--verbose"])),
            Err(UsageError::UnknownOption(_))
        ));
    }
}
