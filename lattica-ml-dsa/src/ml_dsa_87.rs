//! ML-DSA-87 (NIST security category 5).

use crate::params::ML_DSA_87;
use crate::types::define_ml_dsa;

define_ml_dsa! {
    /// ML-DSA-87 algorithm marker.
    MlDsa87,
    params: ML_DSA_87,
    K: 8,
    L: 7
}
