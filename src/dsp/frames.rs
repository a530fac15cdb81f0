use log::debug;

use crate::error::{DspError, DspResult};
use crate::matrix::Matrix;

/// Number of complete frames that fit in `len` samples.
pub fn num_frames(len: usize, frame_length: usize, step: usize) -> usize {
    if frame_length == 0 || step == 0 || len < frame_length {
        return 0;
    }
    1 + (len - frame_length) / step
}

/// Chops a waveform into overlapping frames.
///
/// Column `t` of the result is a copy of `waveform[t * step..t * step + frame_length]`.
/// Trailing samples that do not fill a whole frame are dropped.
pub fn frame(waveform: &[f64], frame_length: usize, step: usize) -> DspResult<Matrix<f64>> {
    if frame_length == 0 {
        return Err(DspError::invalid_param("frame_length", "must be greater than zero"));
    }
    if step == 0 {
        return Err(DspError::invalid_param("step", "must be greater than zero"));
    }
    if waveform.len() < frame_length {
        return Err(DspError::invalid_param(
            "waveform",
            format!(
                "{} samples is shorter than one frame of {}",
                waveform.len(),
                frame_length
            ),
        ));
    }

    let count = num_frames(waveform.len(), frame_length, step);
    let mut frames = Matrix::filled(frame_length, count, 0.0);
    for (t, column) in frames.columns_mut().enumerate() {
        let start = t * step;
        column.copy_from_slice(&waveform[start..start + frame_length]);
    }

    debug!(
        "Framed {} samples into {} frames (length={}, step={})",
        waveform.len(),
        count,
        frame_length,
        step
    );
    Ok(frames)
}
