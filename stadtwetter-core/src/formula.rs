//! Perceived-temperature formulas and unit conversions.
//!
//! Windchill and heat index follow the NOAA definitions. Both formulas are
//! only valid inside a temperature/wind window and pass the input through
//! unchanged outside it.

/// Knots to km/h, exact factor, no rounding.
pub fn knots_to_kmh(knots: f64) -> f64 {
    knots * 1.852
}

/// Truncate a Celsius value toward zero for display.
///
/// Matches the historical behavior of the tool: -3.7 becomes -3, not -4.
pub fn truncate_celsius(temp_c: f64) -> i32 {
    temp_c.trunc() as i32
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Windchill temperature in °C.
///
/// Valid below 10 °C and above 4 km/h wind; outside that window the input
/// temperature is returned unchanged.
pub fn windchill(temp_c: f64, wind_kmh: f64) -> f64 {
    if temp_c >= 10.0 || wind_kmh <= 4.0 {
        return temp_c;
    }

    let v16 = wind_kmh.powf(0.16);
    let twc = 13.12 + 0.6215 * temp_c - 11.37 * v16 + 0.3965 * temp_c * v16;

    round_one_decimal(twc)
}

/// Heat index in °C via the NOAA Rothfusz regression.
///
/// Valid from 27 °C upward; below that the input temperature is returned
/// unchanged.
pub fn heat_index(temp_c: f64, humidity_pct: f64) -> f64 {
    if temp_c < 27.0 {
        return temp_c;
    }

    let temp_f = temp_c * 9.0 / 5.0 + 32.0;
    let temp_f2 = temp_f * temp_f;
    let humidity2 = humidity_pct * humidity_pct;

    let hi_f = -42.379 + 2.04901523 * temp_f + 10.14333127 * humidity_pct
        - 0.22475541 * temp_f * humidity_pct
        - 6.83783e-3 * temp_f2
        - 5.481717e-2 * humidity2
        + 1.22874e-3 * temp_f2 * humidity_pct
        + 8.5282e-4 * temp_f * humidity2
        - 1.99e-6 * temp_f2 * humidity2;

    let hi_c = (hi_f - 32.0) * 5.0 / 9.0;
    round_one_decimal(hi_c)
}

/// Perceived temperature in °C.
///
/// At or above 10 °C, or with wind at or below 4 km/h, the heat index
/// applies; otherwise windchill. Note the heat-index branch is deliberately
/// also taken for mild temperatures below 27 °C, where it is a passthrough.
pub fn feels_like(temp_c: f64, humidity_pct: f64, wind_kmh: f64) -> f64 {
    if temp_c >= 10.0 || wind_kmh <= 4.0 {
        heat_index(temp_c, humidity_pct)
    } else {
        windchill(temp_c, wind_kmh)
    }
}
