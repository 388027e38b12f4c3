// Copyright 2022 Asen Lazarov

mod result_schema;
mod value;

pub use result_schema::*;
pub use value::*;
