use std::str::FromStr;

/// Parses a note name such as `A4`, `C#3` or `Eb2` (or a bare MIDI number) into a MIDI note.
pub fn pitch_parser(s: &str) -> Result<i32, String> {
    if s.is_empty() {
        return Err("Pitch string cannot be empty".to_string());
    }

    let s = s.trim();

    if let Ok(num) = s.parse::<i32>() {
        return Ok(num);
    }

    let mut chars = s.chars().peekable();
    let note_char = chars.next().ok_or("Invalid pitch format")?;

    let note = match note_char.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return Err(format!("Invalid note: {}", note_char)),
    };

    let mut semitone_offset = note;
    if let Some(&next) = chars.peek() {
        match next {
            '#' => {
                chars.next();
                semitone_offset += 1;
            }
            'b' => {
                chars.next();
                semitone_offset -= 1;
            }
            _ => {}
        }
    }

    let octave_str: String = chars.collect();
    if octave_str.is_empty() {
        return Err("Octave number required".to_string());
    }

    let octave: i32 = octave_str
        .parse()
        .map_err(|_| format!("Invalid octave: {}", octave_str))?;

    Ok((octave + 1) * 12 + semitone_offset)
}

/// Fundamental frequency from either Hz (`110`, `97.5`) or a note name (`A2`).
pub fn frequency_parser(s: &str) -> Result<f64, String> {
    let s = s.trim();
    if let Ok(hz) = f64::from_str(s) {
        return positive(hz);
    }
    let midi = pitch_parser(s)?;
    Ok(midi_to_hz(midi as f64))
}

pub fn positive_parser(s: &str) -> Result<f64, String> {
    let s = s.trim();
    f64::from_str(s)
        .map_err(|e| format!("Invalid value '{}': {}", s, e))
        .and_then(positive)
}

fn positive(v: f64) -> Result<f64, String> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("Value must be positive, got {}", v))
    }
}

pub fn midi_to_hz(midi: f64) -> f64 {
    440.0 * 2.0_f64.powf((midi - 69.0) / 12.0)
}

/// Scales `samples` so the largest magnitude equals `peak`. Silence is left untouched.
pub fn normalize_peak(samples: &mut [f64], peak: f64) {
    let max = samples.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
    if max > 0.0 && max.is_finite() {
        let scale = peak / max;
        samples.iter_mut().for_each(|x| *x *= scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_parser() {
        assert_eq!(pitch_parser("C4"), Ok(60));
        assert_eq!(pitch_parser("C#4"), Ok(61));
        assert_eq!(pitch_parser("Cb4"), Ok(59));
        assert_eq!(pitch_parser("A4"), Ok(69));
        assert_eq!(pitch_parser("B3"), Ok(59));
        assert_eq!(pitch_parser("60"), Ok(60));
        assert!(pitch_parser("H2").is_err());
        assert!(pitch_parser("A").is_err());
    }

    #[test]
    fn test_frequency_parser() {
        assert_eq!(frequency_parser("110"), Ok(110.0));
        assert_eq!(frequency_parser(" 97.5 "), Ok(97.5));
        assert!((frequency_parser("A2").unwrap() - 110.0).abs() < 1e-9);
        assert!(frequency_parser("0").is_err());
        assert!(frequency_parser("-100").is_err());
        assert!(frequency_parser("xyz").is_err());
    }

    #[test]
    fn test_positive_parser() {
        assert_eq!(positive_parser("8000"), Ok(8000.0));
        assert!(positive_parser("0").is_err());
        assert!(positive_parser("abc").is_err());
    }

    #[test]
    fn test_math_helpers() {
        assert!((midi_to_hz(60.0) - 261.62556).abs() < 0.01);
        assert_eq!(midi_to_hz(69.0), 440.0);
    }

    #[test]
    fn test_normalize_peak() {
        let mut samples = vec![0.5, -4.0, 2.0];
        normalize_peak(&mut samples, 0.9);
        assert_eq!(samples, vec![0.1125, -0.9, 0.45]);

        let mut silence = vec![0.0; 4];
        normalize_peak(&mut silence, 0.9);
        assert_eq!(silence, vec![0.0; 4]);
    }
}
