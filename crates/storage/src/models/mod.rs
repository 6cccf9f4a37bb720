mod pitch;

pub use pitch::{NewPitch, PITCHES_COLLECTION, Pitch, StoredPitch};
