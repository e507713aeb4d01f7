use chrono::{DateTime, Local};
use interface_constants::Constant;
use std::{collections::BTreeMap, fmt::Write};

use crate::params::{Format, Params, Radix};

#[derive(serde::Serialize)]
struct TomlDoc {
    constants: BTreeMap<String, toml::Value>,
}

pub fn render(
    params: &Params,
    constants: &[Constant],
    generated: DateTime<Local>,
) -> anyhow::Result<String> {
    Ok(match params.format {
        Format::List => render_list(params, constants),
        Format::C => render_c(params, constants, generated),
        Format::Toml => render_toml(params, constants)?,
    })
}

fn format_value(value: u64, radix: Radix) -> String {
    match radix {
        Radix::Hex => format!("{:#x}", value),
        Radix::Dec => value.to_string(),
    }
}

fn render_list(params: &Params, constants: &[Constant]) -> String {
    let mut out = String::new();
    for c in constants {
        writeln!(
            out,
            "{}{} = {}",
            params.prefix,
            c.name,
            format_value(c.value, params.radix)
        )
        .unwrap();
    }
    out
}

fn render_c(params: &Params, constants: &[Constant], generated: DateTime<Local>) -> String {
    let guard = format!("{}INTERFACE_CONSTANTS_H", params.prefix.to_ascii_uppercase());
    let mut out = String::new();
    writeln!(
        out,
        "/* Generated by ifconsts for target_os = {} at {} */",
        std::env::consts::OS,
        generated.format("%F %T%z")
    )
    .unwrap();
    writeln!(out, "#ifndef {}", guard).unwrap();
    writeln!(out, "#define {}", guard).unwrap();
    writeln!(out).unwrap();
    for c in constants {
        writeln!(
            out,
            "#define {}{} {}UL",
            params.prefix,
            c.name,
            format_value(c.value, params.radix)
        )
        .unwrap();
    }
    writeln!(out).unwrap();
    writeln!(out, "#endif /* {} */", guard).unwrap();
    out
}

// TOML integers are signed 64-bit; larger values go out as strings in the
// configured radix.
fn render_toml(params: &Params, constants: &[Constant]) -> anyhow::Result<String> {
    let constants = constants
        .iter()
        .map(|c| {
            let value = match i64::try_from(c.value) {
                Ok(value) => toml::Value::Integer(value),
                Err(_) => toml::Value::String(format_value(c.value, params.radix)),
            };
            (format!("{}{}", params.prefix, c.name), value)
        })
        .collect();
    Ok(toml::to_string(&TomlDoc { constants })?)
}
