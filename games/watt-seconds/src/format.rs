//! Compact readouts for money and power.

const POWER_UNITS: &[&str] = &["W", "kW", "MW", "GW", "TW", "PW", "EW"];
const MONEY_UNITS: &[&str] = &["", "k", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "Oc", "No", "Dc"];

fn scale(value: f64, units: &'static [&'static str]) -> (f64, &'static str) {
    let mut v = value;
    let mut mag = 0;
    while v >= 1000.0 && mag < units.len() - 1 {
        v /= 1000.0;
        mag += 1;
    }
    (v, units[mag])
}

/// Up to three significant digits, trailing zeros dropped.
fn sig3(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let leading = v.abs().log10().floor() as i32;
    let decimals = (2 - leading).max(0) as usize;
    let s = format!("{v:.decimals$}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Three digit columns with the point sliding to fill them.
fn fixed3(v: f64) -> String {
    if v >= 100.0 {
        format!("{v:3.0}")
    } else if v >= 10.0 {
        format!("{v:3.1}")
    } else {
        format!("{v:3.2}")
    }
}

/// Watts with an SI unit, e.g. `2.5GW`.
pub fn format_power(watts: f64) -> String {
    let (v, unit) = scale(watts, POWER_UNITS);
    format!("{}{unit}", sig3(v))
}

/// Fixed-width watts for the stats bar.
pub fn format_power_fixed(watts: f64) -> String {
    let (v, unit) = scale(watts, POWER_UNITS);
    format!("{}{unit}", fixed3(v))
}

/// Dollars with a short-scale unit, e.g. `$4.5M`.
pub fn format_money(amount: f64) -> String {
    let (v, unit) = scale(amount, MONEY_UNITS);
    format!("${}{unit}", sig3(v))
}

/// Fixed-width dollars for the stats bar.
pub fn format_money_fixed(amount: f64) -> String {
    let (v, unit) = scale(amount, MONEY_UNITS);
    format!("${}{unit}", fixed3(v))
}
