pub(crate) mod fingerprint;
pub(crate) mod framing;
pub(crate) mod mesh;
pub(crate) mod primitive;
pub(crate) mod scene;
pub(crate) mod transform;
