pub(crate) mod aggregate;
pub(crate) mod row;
pub(crate) mod table;
