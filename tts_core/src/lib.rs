//! Audio side of the streaming TTS client: WAV decoding of a received
//! payload and the output seam that plays the decoded asset.

mod playback;
mod wav;

pub use playback::{AudioOutput, PlaybackError};
#[cfg(feature = "rodio-output")]
pub use playback::RodioOutput;
pub use wav::{decode_wav, encode_wav, repair_streaming_header, DecodeError, DecodedAudio};
