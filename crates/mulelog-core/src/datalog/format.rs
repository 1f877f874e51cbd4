//! Row formatting
//!
//! The CSV layout is consumed by existing analysis spreadsheets, so both
//! the header and the row format are bit-exact: six comma-separated
//! fields, steering angle with exactly two decimal places, no quoting.

use super::Sample;

/// Column title line, written once at the top of every session file
pub const HEADER: &str = "Millis,throttle,Left,Right,Steering Angle,Wheel Speed";

/// Format one sample as a CSV row (no trailing newline)
pub fn format_row(sample: &Sample) -> String {
    format!(
        "{},{},{},{},{:.2},{}",
        sample.time, sample.throttle, sample.left, sample.right, sample.steer, sample.speed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_layout() {
        let sample = Sample::new(1234, 500, -10, 20, 3.14159, 800);
        assert_eq!(format_row(&sample), "1234,500,-10,20,3.14,800");
    }

    #[test]
    fn test_steering_always_two_decimals() {
        let mut sample = Sample::new(0, 0, 0, 0, 2.0, 0);
        assert_eq!(format_row(&sample), "0,0,0,0,2.00,0");

        sample.steer = -0.5;
        assert_eq!(format_row(&sample), "0,0,0,0,-0.50,0");
    }

    #[test]
    fn test_extreme_field_values() {
        let sample = Sample::new(u32::MAX, u16::MAX, i16::MIN, i16::MAX, -179.999, u16::MAX);
        assert_eq!(
            format_row(&sample),
            "4294967295,65535,-32768,32767,-180.00,65535"
        );
    }
}
