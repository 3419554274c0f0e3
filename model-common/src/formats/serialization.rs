//! Binary serialization trait for format headers.
//!
//! Every `.shmodel` header implements `BinarySerializable` so the reader and
//! writer can treat header tables generically, while each header keeps its
//! own `to_bytes()` returning a fixed-size array.

/// Trait for binary-serializable format headers.
///
/// Returns `Vec<u8>` because `[u8; Self::SIZE]` cannot be named in a trait
/// signature on stable Rust. Use the type-specific `to_bytes()` when the
/// concrete header type is known.
///
/// # Example
///
/// ```
/// use model_common::formats::{BinarySerializable, RigHeader};
///
/// let header = RigHeader::new(3, 0);
/// let bytes = header.serialize();
/// let parsed = RigHeader::deserialize(&bytes).unwrap();
/// assert_eq!(parsed, header);
/// ```
pub trait BinarySerializable: Sized {
    /// Size of the serialized header in bytes.
    const SIZE: usize;

    /// Serialize to bytes.
    fn serialize(&self) -> Vec<u8>;

    /// Deserialize from bytes.
    ///
    /// Returns `None` if the byte slice is too short.
    fn deserialize(bytes: &[u8]) -> Option<Self>;
}

macro_rules! impl_binary_serializable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BinarySerializable for $ty {
                const SIZE: usize = <$ty>::SIZE;

                fn serialize(&self) -> Vec<u8> {
                    self.to_bytes().to_vec()
                }

                fn deserialize(bytes: &[u8]) -> Option<Self> {
                    Self::from_bytes(bytes)
                }
            }
        )*
    };
}

impl_binary_serializable!(
    super::ModelHeader,
    super::MeshHeader,
    super::AnimationHeader,
    super::ChannelHeader,
    super::RigHeader,
);
