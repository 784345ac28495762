//! Unit conversions for sensor values.
//!
//! Raw sensor values come in hundredths (of a degree Celsius, of a percent); the UI shows whole
//! degrees Fahrenheit and whole percents. Rounding goes half up, so 0.5 rounds to 1 and -0.5 to 0.

const HUNDREDTHS: f32 = 100.;
const FAHRENHEIT_OFFSET: f32 = 32.;

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9. / 5. + FAHRENHEIT_OFFSET
}

pub fn fahrenheit_to_celsius(fahrenheit: f32) -> f32 {
    (fahrenheit - FAHRENHEIT_OFFSET) * 5. / 9.
}

pub fn hundredths_celsius_to_fahrenheit(hundredths: i32) -> i32 {
    round_half_up(celsius_to_fahrenheit(hundredths as f32 / HUNDREDTHS))
}

pub fn fahrenheit_to_hundredths_celsius(fahrenheit: i32) -> i32 {
    round_half_up(fahrenheit_to_celsius(fahrenheit as f32) * HUNDREDTHS)
}

pub fn hundredths_percent_to_percent(hundredths: i32) -> i32 {
    round_half_up(hundredths as f32 / HUNDREDTHS)
}

fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_fahrenheit() {
        assert_eq!(celsius_to_fahrenheit(100.), 212.);
        assert_eq!(fahrenheit_to_celsius(32.), 0.);
        assert_eq!(hundredths_celsius_to_fahrenheit(1555), 60);
        assert_eq!(hundredths_celsius_to_fahrenheit(3222), 90);
        assert_eq!(hundredths_celsius_to_fahrenheit(2000), 68);
        assert_eq!(hundredths_celsius_to_fahrenheit(-4000), -40);
    }

    #[test]
    fn fahrenheit_to_hundredths() {
        assert_eq!(fahrenheit_to_hundredths_celsius(212), 10000);
        assert_eq!(fahrenheit_to_hundredths_celsius(69), 2056);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(hundredths_percent_to_percent(4949), 49);
        assert_eq!(hundredths_percent_to_percent(4950), 50);
        assert_eq!(hundredths_percent_to_percent(0), 0);
        assert_eq!(hundredths_percent_to_percent(9999), 100);
    }
}
