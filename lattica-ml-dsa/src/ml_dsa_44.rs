//! ML-DSA-44 (NIST security category 2).

use crate::params::ML_DSA_44;
use crate::types::define_ml_dsa;

define_ml_dsa! {
    /// ML-DSA-44 algorithm marker.
    MlDsa44,
    params: ML_DSA_44,
    K: 4,
    L: 4
}
