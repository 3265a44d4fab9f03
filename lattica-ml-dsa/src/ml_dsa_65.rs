//! ML-DSA-65 (NIST security category 3).

use crate::params::ML_DSA_65;
use crate::types::define_ml_dsa;

define_ml_dsa! {
    /// ML-DSA-65 algorithm marker.
    MlDsa65,
    params: ML_DSA_65,
    K: 6,
    L: 5
}
