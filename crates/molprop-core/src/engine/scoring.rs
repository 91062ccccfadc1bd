use super::config::TgCoefficients;
use crate::core::descriptors::DescriptorVector;

/// The unclamped additive Tg estimate in Kelvin.
pub fn raw_score(descriptors: &DescriptorVector, coefficients: &TgCoefficients) -> f64 {
    let hydrogen_bonding = f64::from(descriptors.h_donors)
        + coefficients.acceptor_share * f64::from(descriptors.h_acceptors);

    coefficients.base
        + coefficients.molecular_weight * descriptors.molecular_weight
        + coefficients.rotatable_bond * f64::from(descriptors.rotatable_bonds)
        + coefficients.hydrogen_bond * hydrogen_bonding
        + coefficients.aromatic_ring * f64::from(descriptors.aromatic_rings)
        + coefficients.amide * f64::from(descriptors.amide_groups)
        + coefficients.ester * f64::from(descriptors.ester_groups)
        + coefficients.ether * f64::from(descriptors.ether_groups)
        + coefficients.alcohol * f64::from(descriptors.alcohol_groups)
}

/// Tg estimate in Kelvin, never below absolute zero.
pub fn score(descriptors: &DescriptorVector, coefficients: &TgCoefficients) -> f64 {
    raw_score(descriptors, coefficients).max(0.0)
}
