pub use crate::{
    category::{arrow::*, cartesian::*, differential::*, traits::*},
    math::ad::{dual::*, forward::*, node::*, reverse::*, tape::*, tapevar::*},
    utils::{errors::*, num::*, pareval::*},
};
