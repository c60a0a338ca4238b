pub(crate) mod infographic;
