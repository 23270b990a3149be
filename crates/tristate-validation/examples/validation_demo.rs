//! Validation Demo
//!
//! Decodes a few JSON payloads into a record of nullable fields and validates
//! each one. Run with `RUST_LOG=tristate_validation=trace` to see per-field
//! dispatch, or `TRISTATE_URL_MAX_LENGTH=32` to tighten the `url` rule.

use serde::Deserialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tristate_null::{NullBool, NullInt, NullString, NullTime};
use tristate_validation::{Record, RuleRegistry, Validator, ValidatorConfig};

#[derive(Debug, Default, Deserialize, Record)]
#[serde(default)]
pub struct Signup {
    #[valid("required~name is required,stringlength(1|10)")]
    pub name: NullString,
    #[valid("url")]
    pub homepage: NullString,
    #[valid("adult~must be 18 or older")]
    pub age: NullInt,
    pub newsletter: NullBool,
    #[serde(rename = "createTime")]
    pub create_time: NullTime,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ValidatorConfig::from_env()?;
    let registry = RuleRegistry::with_config(&config)?;
    registry.register_custom("adult", |value, _| value.as_i64().map_or(true, |age| age >= 18))?;
    let validator = Validator::new(Arc::new(registry));

    println!("Validation Demo");
    println!("===============");

    let payloads = [
        r#"{"name":"Ann","homepage":"https://ann.example.com","age":34,"newsletter":true,"createTime":"2016-10-06T10:00:00Z"}"#,
        r#"{"name":"Bartholomew Jr.","age":null}"#,
        r#"{"name":null,"homepage":"not a url","age":12}"#,
        r#"{}"#,
    ];

    for payload in payloads {
        let signup: Signup = serde_json::from_str(payload)?;
        let (passed, errors) = validator.validate(&signup).into_parts();

        println!();
        println!("payload: {}", payload);
        println!("  name={} homepage={} age={}", signup.name, signup.homepage, signup.age);
        match errors {
            Some(errors) => println!("  passed={} errors: {}", passed, errors),
            None => println!("  passed={}", passed),
        }
    }

    Ok(())
}
