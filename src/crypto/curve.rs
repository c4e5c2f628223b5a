//! # Curve Engine
//!
//! Edwards25519 arithmetic for the catapult signature scheme: Ed25519 with
//! SHA3-512 wherever the reference scheme uses SHA-512.
//!
//! ## Representation
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       FIXED-WIDTH ARITHMETIC                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Field element (mod 2^255 - 19)                                        │
//! │    sixteen 16-bit limbs held in i64, little-endian                     │
//! │    [l0, l1, ..., l15]  value = Σ li · 2^(16i)                           │
//! │                                                                         │
//! │  Point (extended coordinates)                                          │
//! │    [X, Y, Z, T]  with  x = X/Z, y = Y/Z, xy = T/Z                       │
//! │                                                                         │
//! │  Scalar (mod L = 2^252 + 27742317777372353535851937790883648493)      │
//! │    32 little-endian bytes; products accumulate in 64 signed limbs      │
//! │    and are folded back by mod_l                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation is a pure function of its arguments; the only state is
//! the injected [`Hasher`], which is reset before each use.

use zeroize::{Zeroize, Zeroizing};

use super::hasher::{sha3_256, Hasher};
use crate::error::{Error, Result};

type Gf = [i64; 16];
type Point = [Gf; 4];

const GF0: Gf = [0; 16];
const GF1: Gf = [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

/// Curve constant d = -121665/121666
const D: Gf = [
    0x78a3, 0x1359, 0x4dca, 0x75eb, 0xd8ab, 0x4141, 0x0a4d, 0x0070, 0xe898, 0x7779, 0x4079,
    0x8cc7, 0xfe73, 0x2b6f, 0x6cee, 0x5203,
];

/// 2·d
const D2: Gf = [
    0xf159, 0x26b2, 0x9b94, 0xebd6, 0xb156, 0x8283, 0x149a, 0x00e0, 0xd130, 0xeef3, 0x80f2,
    0x198e, 0xfce7, 0x56df, 0xd9dc, 0x2406,
];

/// Base point x coordinate
const X: Gf = [
    0xd51a, 0x8f25, 0x2d60, 0xc956, 0xa7b2, 0x9525, 0xc760, 0x692c, 0xdc5c, 0xfdd6, 0xe231,
    0xc0a4, 0x53fe, 0xcd6e, 0x36d3, 0x2169,
];

/// Base point y coordinate (4/5)
const Y: Gf = [
    0x6658, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666, 0x6666,
    0x6666, 0x6666, 0x6666, 0x6666, 0x6666,
];

/// sqrt(-1)
const I: Gf = [
    0xa0b0, 0x4a0e, 0x1b27, 0xc4ee, 0xe478, 0xad2f, 0x1806, 0x2f43, 0xd7a7, 0x3dfb, 0x0099,
    0x2b4d, 0xdf0b, 0x4fc1, 0x2480, 0x2b83,
];

/// Group order L, little-endian bytes
const L: [i64; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
    0x14, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x10,
];

// ============================================================================
// FIELD ARITHMETIC
// ============================================================================

fn car25519(o: &mut Gf) {
    for i in 0..16 {
        o[i] += 1 << 16;
        let c = o[i] >> 16;
        if i < 15 {
            o[i + 1] += c - 1;
        } else {
            o[0] += 38 * (c - 1);
        }
        o[i] -= c * 65536;
    }
}

/// Swap `p` and `q` when `b == 1`, leave both alone when `b == 0`
fn sel25519(p: &mut Gf, q: &mut Gf, b: i64) {
    let c = !(b - 1);
    for i in 0..16 {
        let t = c & (p[i] ^ q[i]);
        p[i] ^= t;
        q[i] ^= t;
    }
}

fn pack25519(n: &Gf) -> [u8; 32] {
    let mut t = *n;
    car25519(&mut t);
    car25519(&mut t);
    car25519(&mut t);

    let mut m = GF0;
    for _ in 0..2 {
        m[0] = t[0] - 0xffed;
        for i in 1..15 {
            m[i] = t[i] - 0xffff - ((m[i - 1] >> 16) & 1);
            m[i - 1] &= 0xffff;
        }
        m[15] = t[15] - 0x7fff - ((m[14] >> 16) & 1);
        let b = (m[15] >> 16) & 1;
        m[14] &= 0xffff;
        sel25519(&mut t, &mut m, 1 - b);
    }

    let mut o = [0u8; 32];
    for i in 0..16 {
        o[2 * i] = (t[i] & 0xff) as u8;
        o[2 * i + 1] = ((t[i] >> 8) & 0xff) as u8;
    }
    o
}

fn unpack25519(n: &[u8; 32]) -> Gf {
    let mut o = GF0;
    for i in 0..16 {
        o[i] = n[2 * i] as i64 + ((n[2 * i + 1] as i64) << 8);
    }
    o[15] &= 0x7fff;
    o
}

fn neq25519(a: &Gf, b: &Gf) -> bool {
    !ct_eq(&pack25519(a), &pack25519(b))
}

fn par25519(a: &Gf) -> u8 {
    pack25519(a)[0] & 1
}

fn fe_add(a: &Gf, b: &Gf) -> Gf {
    let mut o = GF0;
    for i in 0..16 {
        o[i] = a[i] + b[i];
    }
    o
}

fn fe_sub(a: &Gf, b: &Gf) -> Gf {
    let mut o = GF0;
    for i in 0..16 {
        o[i] = a[i] - b[i];
    }
    o
}

fn fe_mul(a: &Gf, b: &Gf) -> Gf {
    let mut t = [0i64; 31];
    for i in 0..16 {
        for j in 0..16 {
            t[i + j] += a[i] * b[j];
        }
    }
    for i in 0..15 {
        t[i] += 38 * t[i + 16];
    }

    let mut o = GF0;
    o.copy_from_slice(&t[..16]);
    car25519(&mut o);
    car25519(&mut o);
    o
}

fn fe_sq(a: &Gf) -> Gf {
    fe_mul(a, a)
}

/// a^(p-2)
fn inv25519(i: &Gf) -> Gf {
    let mut c = *i;
    for a in (0..=253).rev() {
        c = fe_sq(&c);
        if a != 2 && a != 4 {
            c = fe_mul(&c, i);
        }
    }
    c
}

/// a^((p-5)/8)
fn pow2523(i: &Gf) -> Gf {
    let mut c = *i;
    for a in (0..=250).rev() {
        c = fe_sq(&c);
        if a != 1 {
            c = fe_mul(&c, i);
        }
    }
    c
}

// ============================================================================
// POINT ARITHMETIC
// ============================================================================

/// p += q
pub(crate) fn add(p: &mut Point, q: &Point) {
    let a = fe_mul(&fe_sub(&p[1], &p[0]), &fe_sub(&q[1], &q[0]));
    let b = fe_mul(&fe_add(&p[0], &p[1]), &fe_add(&q[0], &q[1]));
    let c = fe_mul(&fe_mul(&p[3], &q[3]), &D2);
    let d = fe_mul(&p[2], &q[2]);
    let d = fe_add(&d, &d);

    let e = fe_sub(&b, &a);
    let f = fe_sub(&d, &c);
    let g = fe_add(&d, &c);
    let h = fe_add(&b, &a);

    p[0] = fe_mul(&e, &f);
    p[1] = fe_mul(&h, &g);
    p[2] = fe_mul(&g, &f);
    p[3] = fe_mul(&e, &h);
}

fn cswap(p: &mut Point, q: &mut Point, b: i64) {
    for (pi, qi) in p.iter_mut().zip(q.iter_mut()) {
        sel25519(pi, qi, b);
    }
}

/// Encode a point as 32 bytes: y with the parity of x in the top bit
pub(crate) fn pack(p: &Point) -> [u8; 32] {
    let zi = inv25519(&p[2]);
    let tx = fe_mul(&p[0], &zi);
    let ty = fe_mul(&p[1], &zi);
    let mut r = pack25519(&ty);
    r[31] ^= par25519(&tx) << 7;
    r
}

/// Decode a point and negate it, returning `None` when the encoding is not
/// on the curve
pub(crate) fn unpack_neg(p: &[u8; 32]) -> Option<Point> {
    let mut r: Point = [GF0; 4];
    r[2] = GF1;
    r[1] = unpack25519(p);

    let mut num = fe_sq(&r[1]);
    let mut den = fe_mul(&num, &D);
    num = fe_sub(&num, &r[2]);
    den = fe_add(&r[2], &den);

    let den2 = fe_sq(&den);
    let den4 = fe_sq(&den2);
    let den6 = fe_mul(&den4, &den2);
    let mut t = fe_mul(&den6, &num);
    t = fe_mul(&t, &den);

    t = pow2523(&t);
    t = fe_mul(&t, &num);
    t = fe_mul(&t, &den);
    t = fe_mul(&t, &den);
    r[0] = fe_mul(&t, &den);

    let chk = fe_mul(&fe_sq(&r[0]), &den);
    if neq25519(&chk, &num) {
        r[0] = fe_mul(&r[0], &I);
    }

    let chk = fe_mul(&fe_sq(&r[0]), &den);
    if neq25519(&chk, &num) {
        return None;
    }

    if par25519(&r[0]) == (p[31] >> 7) {
        r[0] = fe_sub(&GF0, &r[0]);
    }

    r[3] = fe_mul(&r[0], &r[1]);
    Some(r)
}

/// s·q by a constant-time ladder over all 256 bits of `s`
pub(crate) fn scalar_mult(q: &Point, s: &[u8; 32]) -> Point {
    let mut p: Point = [GF0, GF1, GF1, GF0];
    let mut q = *q;

    for i in (0..256).rev() {
        let b = ((s[i / 8] >> (i & 7)) & 1) as i64;
        cswap(&mut p, &mut q, b);
        add(&mut q, &p);
        let doubled = p;
        add(&mut p, &doubled);
        cswap(&mut p, &mut q, b);
    }
    p
}

/// s·B for the standard base point
pub(crate) fn scalar_base(s: &[u8; 32]) -> Point {
    let q: Point = [X, Y, GF1, fe_mul(&X, &Y)];
    scalar_mult(&q, s)
}

// ============================================================================
// SCALAR ARITHMETIC
// ============================================================================

/// Fold 64 signed limbs modulo L into 32 canonical bytes
pub(crate) fn mod_l(x: &mut [i64; 64]) -> [u8; 32] {
    for i in (32..64).rev() {
        let mut carry = 0i64;
        let mut j = i - 32;
        while j < i - 12 {
            let v = carry - 16 * x[i] * L[j - (i - 32)];
            x[j] += v;
            carry = (x[j] + 128) >> 8;
            x[j] -= carry * 256;
            j += 1;
        }
        x[j] += carry;
        x[i] = 0;
    }

    let mut carry = 0i64;
    for j in 0..32 {
        let v = carry - (x[31] >> 4) * L[j];
        x[j] += v;
        carry = x[j] >> 8;
        x[j] &= 255;
    }
    for j in 0..32 {
        x[j] -= carry * L[j];
    }

    let mut r = [0u8; 32];
    for i in 0..32 {
        x[i + 1] += x[i] >> 8;
        r[i] = (x[i] & 255) as u8;
    }
    r
}

/// Reduce a 64-byte little-endian value modulo L
pub(crate) fn reduce(wide: &[u8; 64]) -> [u8; 32] {
    let mut x = [0i64; 64];
    for (xi, b) in x.iter_mut().zip(wide.iter()) {
        *xi = *b as i64;
    }
    let r = mod_l(&mut x);
    x.zeroize();
    r
}

/// True when `s` is already reduced modulo L
///
/// High flag bits push an encoding past L, so those are rejected too.
pub fn is_reduced_scalar(s: &[u8]) -> bool {
    if s.len() != 32 {
        return false;
    }
    let mut wide = [0u8; 64];
    wide[..32].copy_from_slice(s);
    ct_eq(&reduce(&wide), s)
}

/// True when `s` is reduced modulo L and not zero
///
/// A zero S satisfies the verification equation for any message under a
/// small-order public key, so verification demands this stronger check.
pub fn is_canonical_scalar(s: &[u8]) -> bool {
    let nonzero = s.iter().fold(0u8, |acc, b| acc | b) != 0;
    is_reduced_scalar(s) & nonzero
}

/// Force the Ed25519 scalar bit pattern onto the low half of a hashed key
pub fn clamp(d: &mut [u8; 64]) {
    d[0] &= 248;
    d[31] &= 127;
    d[31] |= 64;
}

/// Byte comparison whose running time does not depend on where inputs differ
pub(crate) fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let diff = a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y));
    diff == 0
}

/// SHA3-512 of the private key, clamped
fn expand_private_key(private_key: &[u8; 32], hasher: &mut Hasher) -> Result<Zeroizing<[u8; 64]>> {
    hasher.reset();
    hasher.update(private_key);
    let mut d = Zeroizing::new(hasher.finalize_64()?);
    clamp(&mut d);
    Ok(d)
}

fn low_half(d: &[u8; 64]) -> Zeroizing<[u8; 32]> {
    let mut s = Zeroizing::new([0u8; 32]);
    s.copy_from_slice(&d[..32]);
    s
}

// ============================================================================
// SCHEME OPERATIONS
// ============================================================================

/// Derive the packed public key for `private_key`
///
/// `hasher` must be a SHA3-512 hasher.
pub fn extract_public_key(private_key: &[u8; 32], hasher: &mut Hasher) -> Result<[u8; 32]> {
    let d = expand_private_key(private_key, hasher)?;
    Ok(pack(&scalar_base(&low_half(&d))))
}

/// Produce `R ‖ S` over `message`
///
/// ```text
/// d      = clamp(H(sk))[0..32]
/// r      = H(H(sk)[32..64] ‖ m) mod L
/// R      = r·B
/// h      = H(R ‖ pk ‖ m) mod L
/// S      = (r + h·d) mod L
/// ```
pub fn sign(
    message: &[u8],
    public_key: &[u8; 32],
    private_key: &[u8; 32],
    hasher: &mut Hasher,
) -> Result<[u8; 64]> {
    let d = expand_private_key(private_key, hasher)?;

    hasher.reset();
    hasher.update(&d[32..]);
    hasher.update(message);
    let nonce = Zeroizing::new(hasher.finalize_64()?);
    let r = Zeroizing::new(reduce(&nonce));

    let mut signature = [0u8; 64];
    signature[..32].copy_from_slice(&pack(&scalar_base(&r)));

    hasher.reset();
    hasher.update(&signature[..32]);
    hasher.update(public_key);
    hasher.update(message);
    let h = reduce(&hasher.finalize_64()?);

    // muladd: r + h·d in 64 unreduced limbs
    let mut x = [0i64; 64];
    for i in 0..32 {
        x[i] = r[i] as i64;
    }
    for i in 0..32 {
        for j in 0..32 {
            x[i + j] += h[i] as i64 * d[j] as i64;
        }
    }
    let s = mod_l(&mut x);
    x.zeroize();

    if !is_reduced_scalar(&s) {
        return Err(Error::NonCanonicalSignature);
    }
    signature[32..].copy_from_slice(&s);
    Ok(signature)
}

/// Check `signature` over `message` against `public_key`
///
/// Returns `false`, never an error, for an unreduced or zero S, the all-zero
/// public key, an undecodable public key, or a mismatch.
pub fn verify(
    public_key: &[u8; 32],
    message: &[u8],
    signature: &[u8; 64],
    hasher: &mut Hasher,
) -> bool {
    let (r_half, s_half) = signature.split_at(32);

    if !is_canonical_scalar(s_half) {
        return false;
    }

    // the all-zero key is a known weak key
    if public_key.iter().all(|&b| b == 0) {
        return false;
    }

    let Some(neg_a) = unpack_neg(public_key) else {
        return false;
    };

    hasher.reset();
    hasher.update(r_half);
    hasher.update(public_key);
    hasher.update(message);
    let Ok(digest) = hasher.finalize_64() else {
        return false;
    };
    let h = reduce(&digest);

    let mut s = [0u8; 32];
    s.copy_from_slice(s_half);

    let mut p = scalar_mult(&neg_a, &h);
    add(&mut p, &scalar_base(&s));

    ct_eq(&pack(&p), r_half)
}

/// Salted shared key between `private_key` and the other party's `public_key`
///
/// ```text
/// d      = clamp(H512(sk))[0..32]
/// P      = d·(-A)
/// key    = H256(pack(P) XOR salt)
/// ```
///
/// Both parties land on the same `P` (up to the shared negation), so the
/// result is symmetric.
pub fn derive_shared_key(
    salt: &[u8; 32],
    private_key: &[u8; 32],
    public_key: &[u8; 32],
    hasher: &mut Hasher,
) -> Result<[u8; 32]> {
    let d = expand_private_key(private_key, hasher)?;
    let neg_a = unpack_neg(public_key)
        .ok_or_else(|| Error::InvalidKey("public key is not a point on the curve".into()))?;

    let mut shared = Zeroizing::new(pack(&scalar_mult(&neg_a, &low_half(&d))));
    for (b, s) in shared.iter_mut().zip(salt.iter()) {
        *b ^= s;
    }

    Ok(sha3_256(&shared[..]))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hasher::HashAlgorithm;

    const VECTOR_PRIVATE: &str = "041e2ce90c31cd65620ed16ab7a5a485e5b335d7e61c75cd9b3a2fed3e091728";
    const VECTOR_PUBLIC: &str = "9a49366406aca952b88badf5f1e9be6ce4968141035a60be503273ea65456b24";

    fn hasher() -> Hasher {
        Hasher::new(HashAlgorithm::Sha3_512)
    }

    fn key(hex_str: &str) -> [u8; 32] {
        hex::decode(hex_str).unwrap().try_into().unwrap()
    }

    fn l_bytes() -> [u8; 32] {
        let mut out = [0u8; 32];
        for (o, l) in out.iter_mut().zip(L.iter()) {
            *o = *l as u8;
        }
        out
    }

    #[test]
    fn test_clamp_bit_pattern() {
        let mut d = [0xffu8; 64];
        clamp(&mut d);
        assert_eq!(d[0], 0xf8);
        assert_eq!(d[31], 0x7f);
        assert_eq!(d[32], 0xff);

        let mut d = [0u8; 64];
        clamp(&mut d);
        assert_eq!(d[31], 0x40);
    }

    #[test]
    fn test_base_point_encoding() {
        let mut one = [0u8; 32];
        one[0] = 1;
        assert_eq!(
            hex::encode(pack(&scalar_base(&one))),
            "5866666666666666666666666666666666666666666666666666666666666666"
        );
    }

    #[test]
    fn test_unpack_neg_flips_sign() {
        let mut one = [0u8; 32];
        one[0] = 1;
        let base = pack(&scalar_base(&one));
        let neg = unpack_neg(&base).unwrap();
        let packed = pack(&neg);

        assert_eq!(packed[..31], base[..31]);
        assert_eq!(packed[31], base[31] ^ 0x80);
    }

    #[test]
    fn test_unpack_neg_rejects_off_curve() {
        // y = 2 has no matching x on the curve
        let mut bad = [0u8; 32];
        bad[0] = 2;
        assert!(unpack_neg(&bad).is_none());
    }

    #[test]
    fn test_reduce_group_order_is_zero() {
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&l_bytes());
        assert_eq!(reduce(&wide), [0u8; 32]);
    }

    #[test]
    fn test_reduce_keeps_small_values() {
        let mut wide = [0u8; 64];
        wide[0] = 5;
        wide[1] = 1;
        let r = reduce(&wide);
        assert_eq!(r[0], 5);
        assert_eq!(r[1], 1);
        assert!(r[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_canonical_scalar_bounds() {
        let l = l_bytes();
        assert!(!is_canonical_scalar(&l));

        let mut l_minus_one = l;
        l_minus_one[0] -= 1;
        assert!(is_canonical_scalar(&l_minus_one));

        assert!(is_reduced_scalar(&[0u8; 32]));
        assert!(!is_canonical_scalar(&[0u8; 32]));

        let mut one = [0u8; 32];
        one[0] = 1;
        assert!(is_canonical_scalar(&one));

        let mut flagged = [0u8; 32];
        flagged[31] = 0x80;
        assert!(!is_canonical_scalar(&flagged));

        assert!(!is_canonical_scalar(&[0u8; 31]));
    }

    #[test]
    fn test_verify_rejects_zero_s_under_small_order_key() {
        // y = 1 encodes the identity; R = identity and S = 0 would satisfy
        // the group equation for every message
        let mut identity = [0u8; 32];
        identity[0] = 1;
        let mut sig = [0u8; 64];
        sig[0] = 1;

        let mut h = hasher();
        assert!(!verify(&identity, b"transfer everything", &sig, &mut h));
        assert!(!verify(&identity, b"an unrelated message", &sig, &mut h));
    }

    #[test]
    fn test_known_public_key() {
        let public = extract_public_key(&key(VECTOR_PRIVATE), &mut hasher()).unwrap();
        assert_eq!(hex::encode(public), VECTOR_PUBLIC);
    }

    #[test]
    fn test_extract_requires_512_bit_hasher() {
        let mut wrong = Hasher::new(HashAlgorithm::Sha3_256);
        assert!(extract_public_key(&key(VECTOR_PRIVATE), &mut wrong).is_err());
    }

    #[test]
    fn test_known_signature() {
        let sk = key(VECTOR_PRIVATE);
        let pk = key(VECTOR_PUBLIC);
        let sig = sign(b"catapult signing core", &pk, &sk, &mut hasher()).unwrap();
        assert_eq!(
            hex::encode(sig),
            "4513c233cd9061cdb50e7e1540d24fe395cdd9dfbf920360d0ff9312c9156294\
             ee765b9c2c9e4642efa64a55f3cac249ff3e29d79edb6a80244836f8abf95f03"
        );
    }

    #[test]
    fn test_sign_verify_round_trip() {
        let sk = key(VECTOR_PRIVATE);
        let pk = key(VECTOR_PUBLIC);
        let mut h = hasher();

        let sig = sign(b"", &pk, &sk, &mut h).unwrap();
        assert!(verify(&pk, b"", &sig, &mut h));
    }

    #[test]
    fn test_verify_rejects_unreduced_s() {
        let sk = key(VECTOR_PRIVATE);
        let pk = key(VECTOR_PUBLIC);
        let mut h = hasher();
        let mut sig = sign(b"msg", &pk, &sk, &mut h).unwrap();

        // S + L is congruent to S but not reduced
        let mut carry = 0u16;
        for (i, l) in L.iter().enumerate() {
            let sum = sig[32 + i] as u16 + *l as u16 + carry;
            sig[32 + i] = sum as u8;
            carry = sum >> 8;
        }
        assert_eq!(carry, 0);
        assert!(!verify(&pk, b"msg", &sig, &mut h));
    }

    #[test]
    fn test_verify_rejects_zero_key() {
        let sk = key(VECTOR_PRIVATE);
        let pk = key(VECTOR_PUBLIC);
        let mut h = hasher();
        let sig = sign(b"msg", &pk, &sk, &mut h).unwrap();
        assert!(!verify(&[0u8; 32], b"msg", &sig, &mut h));
    }

    #[test]
    fn test_shared_key_vector() {
        let salt: [u8; 32] = core::array::from_fn(|i| i as u8);
        let other = key("2d04dfc0418a1a2893aa56cb651ae2f3fbe3884f77e64476984e9a6bfb1b7b46");
        let shared =
            derive_shared_key(&salt, &key(VECTOR_PRIVATE), &other, &mut hasher()).unwrap();
        assert_eq!(
            hex::encode(shared),
            "dbe59748f9bfe04a079b9c20c1d93ff7ff25bb69be394166ef727a1a0f3df2a4"
        );
    }

    #[test]
    fn test_shared_key_rejects_off_curve_point() {
        let mut bad = [0u8; 32];
        bad[0] = 2;
        let err = derive_shared_key(&[0u8; 32], &key(VECTOR_PRIVATE), &bad, &mut hasher());
        assert!(matches!(err, Err(Error::InvalidKey(_))));
    }
}
