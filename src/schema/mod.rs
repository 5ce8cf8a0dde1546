pub(crate) mod kitbash;
pub(crate) mod strict;
