// Helpers shared by the unit tests.
pub(crate) mod testing;
