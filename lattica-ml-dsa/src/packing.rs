//! Bit-exact encodings of polynomials, keys and signatures (FIPS 204 §7).
//!
//! Bits are packed little-endian: coefficient `i` of a `b`-bit encoding
//! occupies bits `i*b .. (i+1)*b` of the output, least significant first.

use subtle::{Choice, ConstantTimeGreater};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::params::{ParamSet, CRH_BYTES, SEED_BYTES, T0_PACKED_BYTES, T1_PACKED_BYTES};
use crate::poly::{Poly, N};
use crate::polyvec::PolyVec;
use crate::reduce::center;
use crate::{Error, Result};

/// Pack 256 values of `bits` bits each. `out` must be `32 * bits` bytes.
pub(crate) fn pack_bits(values: &[u32; N], bits: usize, out: &mut [u8]) {
    debug_assert_eq!(out.len(), N * bits / 8);
    let mut acc = 0u64;
    let mut held = 0;
    let mut pos = 0;
    for &v in values {
        acc |= u64::from(v) << held;
        held += bits;
        while held >= 8 {
            out[pos] = acc as u8;
            acc >>= 8;
            held -= 8;
            pos += 1;
        }
    }
}

/// Inverse of [`pack_bits`]. `input` must be `32 * bits` bytes.
pub(crate) fn unpack_bits(input: &[u8], bits: usize) -> [u32; N] {
    debug_assert_eq!(input.len(), N * bits / 8);
    let mask = (1u64 << bits) - 1;
    let mut out = [0u32; N];
    let mut acc = 0u64;
    let mut held = 0;
    let mut pos = 0;
    for v in &mut out {
        while held < bits {
            acc |= u64::from(input[pos]) << held;
            held += 8;
            pos += 1;
        }
        *v = (acc & mask) as u32;
        acc >>= bits;
        held -= bits;
    }
    out
}

/// How one family of coefficients maps onto unsigned fields.
///
/// A coefficient `c` is stored as `c` or, for signed families, as
/// `offset - c`; the stored value must lie in `[0, max]`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Codec {
    bits: usize,
    offset: i32,
    signed: bool,
    max: u32,
}

impl Codec {
    /// `t1`: 10-bit unsigned.
    pub(crate) const T1: Self = Self {
        bits: 10,
        offset: 0,
        signed: false,
        max: (1 << 10) - 1,
    };

    /// `t0`: 13 bits, stored as `2^12 - c`.
    pub(crate) const T0: Self = Self {
        bits: 13,
        offset: 1 << 12,
        signed: true,
        max: (1 << 13) - 1,
    };

    /// Secret coefficients in `[-eta, eta]`.
    pub(crate) const fn eta(p: &ParamSet) -> Self {
        Self {
            bits: p.eta_bits(),
            offset: p.eta,
            signed: true,
            max: 2 * p.eta as u32,
        }
    }

    /// Response coefficients in `(-gamma1, gamma1]`.
    pub(crate) const fn z(p: &ParamSet) -> Self {
        Self {
            bits: p.gamma1_bits(),
            offset: p.gamma1,
            signed: true,
            max: 2 * p.gamma1 as u32 - 1,
        }
    }

    /// High bits `w1` in `[0, (q-1)/(2 gamma2))`.
    pub(crate) const fn w1(p: &ParamSet) -> Self {
        Self {
            bits: p.w1_bits(),
            offset: 0,
            signed: false,
            max: p.w1_modulus() as u32 - 1,
        }
    }

    /// Bytes per encoded polynomial.
    pub(crate) const fn packed_bytes(&self) -> usize {
        N * self.bits / 8
    }

    /// Encode `poly` into `out`, refusing coefficients outside the family's
    /// range. The range test runs over every coefficient.
    pub(crate) fn encode(&self, poly: &Poly, out: &mut [u8]) -> Result<()> {
        let mut stored = [0u32; N];
        let mut bad = Choice::from(0u8);
        for (s, &c) in stored.iter_mut().zip(&poly.coeffs) {
            let c = center(c);
            let v = (if self.signed { self.offset - c } else { c }) as u32;
            bad |= v.ct_gt(&self.max);
            *s = v;
        }
        if bool::from(bad) {
            stored.zeroize();
            return Err(Error::CoefficientOutOfRange);
        }
        pack_bits(&stored, self.bits, out);
        stored.zeroize();
        Ok(())
    }

    /// Decode one polynomial. Fields above `max` are `MalformedEncoding`.
    pub(crate) fn decode(&self, input: &[u8]) -> Result<Poly> {
        let (poly, ok) = self.decode_ct(input);
        if bool::from(ok) {
            Ok(poly)
        } else {
            Err(Error::MalformedEncoding)
        }
    }

    /// Decode one polynomial, reporting validity as a `Choice`.
    pub(crate) fn decode_ct(&self, input: &[u8]) -> (Poly, Choice) {
        let mut stored = unpack_bits(input, self.bits);
        let mut bad = Choice::from(0u8);
        let mut poly = Poly::zero();
        for (c, &v) in poly.coeffs.iter_mut().zip(&stored) {
            bad |= v.ct_gt(&self.max);
            *c = if self.signed {
                self.offset - v as i32
            } else {
                v as i32
            };
        }
        stored.zeroize();
        (poly, !bad)
    }
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::InvalidKeyLength { expected, actual })
    }
}

/// Encode `pk = rho || t1`.
pub fn pack_public_key<const K: usize>(
    p: &ParamSet,
    rho: &[u8; SEED_BYTES],
    t1: &PolyVec<K>,
    out: &mut [u8],
) -> Result<()> {
    check_len(p.pk_bytes(), out.len())?;
    let (head, body) = out.split_at_mut(SEED_BYTES);
    head.copy_from_slice(rho);
    for (poly, chunk) in t1.polys.iter().zip(body.chunks_exact_mut(T1_PACKED_BYTES)) {
        Codec::T1.encode(poly, chunk)?;
    }
    Ok(())
}

/// Decode a public key into `(rho, t1)`. Only the length can be wrong.
pub fn unpack_public_key<const K: usize>(
    p: &ParamSet,
    pk: &[u8],
) -> Result<([u8; SEED_BYTES], PolyVec<K>)> {
    check_len(p.pk_bytes(), pk.len())?;
    let (head, body) = pk.split_at(SEED_BYTES);
    let mut rho = [0u8; SEED_BYTES];
    rho.copy_from_slice(head);
    let mut t1 = PolyVec::<K>::zero();
    for (poly, chunk) in t1.polys.iter_mut().zip(body.chunks_exact(T1_PACKED_BYTES)) {
        *poly = Codec::T1.decode(chunk)?;
    }
    Ok((rho, t1))
}

/// Decoded secret key. Wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKeyParts<const K: usize, const L: usize> {
    /// Public matrix seed.
    pub rho: [u8; SEED_BYTES],
    /// Signing seed `K`.
    pub key: [u8; SEED_BYTES],
    /// `H(pk)`.
    pub tr: [u8; CRH_BYTES],
    /// Secret vector of length `l`.
    pub s1: PolyVec<L>,
    /// Secret vector of length `k`.
    pub s2: PolyVec<K>,
    /// Low bits of `t`.
    pub t0: PolyVec<K>,
}

/// Encode `sk = rho || K || tr || s1 || s2 || t0`.
pub fn pack_secret_key<const K: usize, const L: usize>(
    p: &ParamSet,
    parts: &SecretKeyParts<K, L>,
    out: &mut [u8],
) -> Result<()> {
    check_len(p.sk_bytes(), out.len())?;
    let eta = Codec::eta(p);
    let eta_len = eta.packed_bytes();

    out[..SEED_BYTES].copy_from_slice(&parts.rho);
    out[SEED_BYTES..2 * SEED_BYTES].copy_from_slice(&parts.key);
    out[2 * SEED_BYTES..2 * SEED_BYTES + CRH_BYTES].copy_from_slice(&parts.tr);

    let (s_area, t0_area) = out[2 * SEED_BYTES + CRH_BYTES..].split_at_mut((K + L) * eta_len);
    let secrets = parts.s1.polys.iter().chain(&parts.s2.polys);
    for (poly, chunk) in secrets.zip(s_area.chunks_exact_mut(eta_len)) {
        eta.encode(poly, chunk)?;
    }
    for (poly, chunk) in parts.t0.polys.iter().zip(t0_area.chunks_exact_mut(T0_PACKED_BYTES)) {
        Codec::T0.encode(poly, chunk)?;
    }
    Ok(())
}

/// Decode a secret key. Secret coefficients outside `[-eta, eta]` are
/// rejected with `MalformedEncoding`.
pub fn unpack_secret_key<const K: usize, const L: usize>(
    p: &ParamSet,
    sk: &[u8],
) -> Result<SecretKeyParts<K, L>> {
    check_len(p.sk_bytes(), sk.len())?;
    let eta = Codec::eta(p);
    let eta_len = eta.packed_bytes();

    let mut parts = SecretKeyParts {
        rho: [0u8; SEED_BYTES],
        key: [0u8; SEED_BYTES],
        tr: [0u8; CRH_BYTES],
        s1: PolyVec::zero(),
        s2: PolyVec::zero(),
        t0: PolyVec::zero(),
    };
    parts.rho.copy_from_slice(&sk[..SEED_BYTES]);
    parts.key.copy_from_slice(&sk[SEED_BYTES..2 * SEED_BYTES]);
    parts.tr.copy_from_slice(&sk[2 * SEED_BYTES..2 * SEED_BYTES + CRH_BYTES]);

    let (s_area, t0_area) = sk[2 * SEED_BYTES + CRH_BYTES..].split_at((K + L) * eta_len);
    let (s1_area, s2_area) = s_area.split_at(L * eta_len);

    let mut ok = Choice::from(1u8);
    for (poly, chunk) in parts.s1.polys.iter_mut().zip(s1_area.chunks_exact(eta_len)) {
        let (decoded, valid) = eta.decode_ct(chunk);
        *poly = decoded;
        ok &= valid;
    }
    for (poly, chunk) in parts.s2.polys.iter_mut().zip(s2_area.chunks_exact(eta_len)) {
        let (decoded, valid) = eta.decode_ct(chunk);
        *poly = decoded;
        ok &= valid;
    }
    for (poly, chunk) in parts.t0.polys.iter_mut().zip(t0_area.chunks_exact(T0_PACKED_BYTES)) {
        *poly = Codec::T0.decode(chunk)?;
    }

    if bool::from(ok) {
        Ok(parts)
    } else {
        Err(Error::MalformedEncoding)
    }
}

/// Encode hints as `omega` position bytes followed by `k` cumulative counts.
///
/// Every coefficient of `h` must be 0 or 1 and the total weight at most
/// `omega`.
pub fn pack_hints<const K: usize>(p: &ParamSet, h: &PolyVec<K>, out: &mut [u8]) -> Result<()> {
    debug_assert_eq!(out.len(), p.hint_bytes());
    out.fill(0);
    let mut idx = 0;
    for (i, poly) in h.polys.iter().enumerate() {
        for (j, &bit) in poly.coeffs.iter().enumerate() {
            if bit != 0 {
                if bit != 1 || idx >= p.omega {
                    return Err(Error::CoefficientOutOfRange);
                }
                out[idx] = j as u8;
                idx += 1;
            }
        }
        out[p.omega + i] = idx as u8;
    }
    Ok(())
}

/// Decode hints. The second value is false when the encoding is not the
/// unique canonical one: counts decreasing or above `omega`, positions not
/// strictly increasing inside a polynomial, or nonzero unused slots.
///
/// Decoding never stops early; a malformed input still yields some hint
/// vector alongside the failed flag.
pub fn unpack_hints<const K: usize>(p: &ParamSet, input: &[u8]) -> (PolyVec<K>, Choice) {
    debug_assert_eq!(input.len(), p.hint_bytes());
    let omega = p.omega;
    let mut h = PolyVec::<K>::zero();
    let mut ok = true;
    let mut idx = 0;

    for (i, poly) in h.polys.iter_mut().enumerate() {
        let end = usize::from(input[omega + i]);
        ok &= end >= idx && end <= omega;
        let end = end.clamp(idx, omega);
        let first = idx;
        while idx < end {
            let pos = usize::from(input[idx]);
            ok &= idx == first || input[idx - 1] < input[idx];
            poly.coeffs[pos] = 1;
            idx += 1;
        }
    }
    for &b in &input[idx..omega] {
        ok &= b == 0;
    }

    (h, Choice::from(u8::from(ok)))
}

/// Total number of set hints.
#[cfg(test)]
pub fn hint_weight<const K: usize>(h: &PolyVec<K>) -> usize {
    h.polys
        .iter()
        .flat_map(|poly| poly.coeffs.iter())
        .filter(|&&c| c != 0)
        .count()
}

/// Encode `sig = c~ || z || h`.
pub fn pack_signature<const K: usize, const L: usize>(
    p: &ParamSet,
    c_tilde: &[u8],
    z: &PolyVec<L>,
    h: &PolyVec<K>,
    out: &mut [u8],
) -> Result<()> {
    if out.len() != p.sig_bytes() {
        return Err(Error::InvalidSignatureLength {
            expected: p.sig_bytes(),
            actual: out.len(),
        });
    }
    let codec = Codec::z(p);
    let (ct_area, rest) = out.split_at_mut(p.c_tilde_bytes);
    let (z_area, h_area) = rest.split_at_mut(L * codec.packed_bytes());
    ct_area.copy_from_slice(&c_tilde[..p.c_tilde_bytes]);
    for (poly, chunk) in z.polys.iter().zip(z_area.chunks_exact_mut(codec.packed_bytes())) {
        codec.encode(poly, chunk)?;
    }
    pack_hints(p, h, h_area)
}

/// A decoded signature together with its hint-encoding validity flag.
pub struct UnpackedSignature<'a, const K: usize, const L: usize> {
    /// Challenge seed, `c_tilde_bytes` long.
    pub c_tilde: &'a [u8],
    /// Response vector.
    pub z: PolyVec<L>,
    /// Hint vector.
    pub h: PolyVec<K>,
    /// Whether the hint bytes were canonical.
    pub hints_ok: Choice,
}

/// Split and decode a signature. Only a wrong length is an error; every
/// `z` bit pattern is representable and hint problems are reported in
/// [`UnpackedSignature::hints_ok`].
pub fn unpack_signature<'a, const K: usize, const L: usize>(
    p: &ParamSet,
    sig: &'a [u8],
) -> Result<UnpackedSignature<'a, K, L>> {
    if sig.len() != p.sig_bytes() {
        return Err(Error::InvalidSignatureLength {
            expected: p.sig_bytes(),
            actual: sig.len(),
        });
    }
    let codec = Codec::z(p);
    let (c_tilde, rest) = sig.split_at(p.c_tilde_bytes);
    let (z_area, h_area) = rest.split_at(L * codec.packed_bytes());

    let mut z = PolyVec::<L>::zero();
    for (poly, chunk) in z.polys.iter_mut().zip(z_area.chunks_exact(codec.packed_bytes())) {
        *poly = codec.decode_ct(chunk).0;
    }
    let (h, hints_ok) = unpack_hints::<K>(p, h_area);
    Ok(UnpackedSignature {
        c_tilde,
        z,
        h,
        hints_ok,
    })
}

/// Encode `w1` for the challenge hash into `out`, returning the used prefix.
pub fn pack_w1<'a, const K: usize>(
    p: &ParamSet,
    w1: &PolyVec<K>,
    out: &'a mut [u8],
) -> Result<&'a [u8]> {
    let codec = Codec::w1(p);
    let len = K * codec.packed_bytes();
    let out = out.get_mut(..len).ok_or(Error::MalformedEncoding)?;
    for (poly, chunk) in w1.polys.iter().zip(out.chunks_exact_mut(codec.packed_bytes())) {
        codec.encode(poly, chunk)?;
    }
    Ok(out)
}
