//! Finite arithmetic over the symbol residues used by the grid family of cards.
//!
//! Elements of GF(p^m) are encoded as integers `0..p^m` whose base-`p` digits
//! (least significant first) are the coefficients of a polynomial of degree
//! `< m`. Multiplication reduces modulo the first monic irreducible polynomial
//! of degree `m` in enumeration order, so for a prime order the tables are
//! exactly addition and multiplication modulo `p`.

/// Split `order` into `(prime, exponent)` when it is a prime power.
pub fn prime_power(order: usize) -> Option<(usize, u32)> {
    if order < 2 {
        return None;
    }
    let prime = (2..=order).find(|d| order % d == 0)?;
    let mut rest = order;
    let mut exponent = 0;
    while rest % prime == 0 {
        rest /= prime;
        exponent += 1;
    }
    (rest == 1).then_some((prime, exponent))
}

/// True when a finite field (and hence a projective plane) of this order exists.
pub fn is_prime_power(order: usize) -> bool {
    prime_power(order).is_some()
}

/// Addition and multiplication tables over `0..order`.
///
/// Prime-power orders get true field arithmetic; any other order falls back to
/// plain residues, which does not form a field.
#[derive(Debug, Clone)]
pub struct Arithmetic {
    order: usize,
    field: bool,
    add: Vec<usize>,
    mul: Vec<usize>,
}

impl Arithmetic {
    pub fn for_order(order: usize) -> Self {
        match prime_power(order) {
            Some((prime, degree)) => Self::galois(prime, degree as usize),
            None => Self::residues(order),
        }
    }

    fn residues(order: usize) -> Self {
        let mut add = vec![0; order * order];
        let mut mul = vec![0; order * order];
        for a in 0..order {
            for b in 0..order {
                add[a * order + b] = (a + b) % order;
                mul[a * order + b] = (a * b) % order;
            }
        }
        Self {
            order,
            field: false,
            add,
            mul,
        }
    }

    fn galois(prime: usize, degree: usize) -> Self {
        let order = prime.pow(degree as u32);
        let modulus = irreducible(prime, degree);
        let elements: Vec<Vec<usize>> = (0..order).map(|e| digits(e, prime, degree)).collect();

        let mut add = vec![0; order * order];
        let mut mul = vec![0; order * order];
        for (a, da) in elements.iter().enumerate() {
            for (b, db) in elements.iter().enumerate() {
                let sum: Vec<usize> = da
                    .iter()
                    .zip(db)
                    .map(|(x, y)| (x + y) % prime)
                    .collect();
                add[a * order + b] = from_digits(&sum, prime);
                mul[a * order + b] = from_digits(&mul_mod(da, db, &modulus, prime), prime);
            }
        }
        Self {
            order,
            field: true,
            add,
            mul,
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Whether these tables form a field.
    pub fn is_field(&self) -> bool {
        self.field
    }

    pub fn add(&self, a: usize, b: usize) -> usize {
        self.add[a * self.order + b]
    }

    pub fn mul(&self, a: usize, b: usize) -> usize {
        self.mul[a * self.order + b]
    }
}

fn digits(mut value: usize, base: usize, len: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push(value % base);
        value /= base;
    }
    out
}

fn from_digits(digits: &[usize], base: usize) -> usize {
    digits.iter().rev().fold(0, |acc, d| acc * base + d)
}

/// Product of two reduced polynomials modulo a monic `modulus` of degree `len`.
fn mul_mod(a: &[usize], b: &[usize], modulus: &[usize], prime: usize) -> Vec<usize> {
    let len = a.len();
    let mut product = vec![0; 2 * len - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            product[i + j] = (product[i + j] + x * y) % prime;
        }
    }
    for degree in (len..product.len()).rev() {
        let lead = product[degree];
        if lead == 0 {
            continue;
        }
        let shift = degree - len;
        for (k, c) in modulus.iter().enumerate() {
            product[shift + k] = (product[shift + k] + prime - (lead * c) % prime) % prime;
        }
    }
    product.truncate(len);
    product
}

fn rem(dividend: &[usize], divisor: &[usize], prime: usize) -> Vec<usize> {
    let mut rest = dividend.to_vec();
    let divisor_degree = divisor.len() - 1;
    while rest.len() > divisor_degree {
        let lead = rest[rest.len() - 1];
        let shift = rest.len() - 1 - divisor_degree;
        if lead != 0 {
            for (k, c) in divisor.iter().enumerate() {
                rest[shift + k] = (rest[shift + k] + prime - (lead * c) % prime) % prime;
            }
        }
        rest.pop();
    }
    rest
}

fn monic(lower: usize, prime: usize, degree: usize) -> Vec<usize> {
    let mut poly = digits(lower, prime, degree);
    poly.push(1);
    poly
}

/// First monic irreducible polynomial of `degree` over GF(`prime`).
fn irreducible(prime: usize, degree: usize) -> Vec<usize> {
    let candidates = prime.pow(degree as u32);
    (0..candidates)
        .map(|lower| monic(lower, prime, degree))
        .find(|poly| {
            (1..=degree / 2).all(|k| {
                (0..prime.pow(k as u32)).all(|lower| {
                    let divisor = monic(lower, prime, k);
                    rem(poly, &divisor, prime).iter().any(|&c| c != 0)
                })
            })
        })
        .unwrap_or_else(|| monic(0, prime, degree))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prime_power_detection() {
        assert_eq!(prime_power(2), Some((2, 1)));
        assert_eq!(prime_power(4), Some((2, 2)));
        assert_eq!(prime_power(9), Some((3, 2)));
        assert_eq!(prime_power(7), Some((7, 1)));
        assert_eq!(prime_power(6), None);
        assert_eq!(prime_power(1), None);
        assert_eq!(prime_power(0), None);
    }

    #[test]
    fn prime_order_matches_residues() {
        let arith = Arithmetic::for_order(5);
        assert!(arith.is_field());
        for a in 0..5 {
            for b in 0..5 {
                assert_eq!(arith.add(a, b), (a + b) % 5);
                assert_eq!(arith.mul(a, b), (a * b) % 5);
            }
        }
    }

    #[test]
    fn every_nonzero_element_is_invertible_in_gf4_and_gf9() {
        for order in [4, 8, 9] {
            let arith = Arithmetic::for_order(order);
            assert!(arith.is_field());
            for a in 1..order {
                let inverses = (1..order).filter(|&b| arith.mul(a, b) == 1).count();
                assert_eq!(inverses, 1, "element {a} in GF({order})");
            }
        }
    }

    #[test]
    fn non_prime_power_is_not_a_field() {
        let arith = Arithmetic::for_order(6);
        assert!(!arith.is_field());
        assert_eq!(arith.mul(2, 3), 0);
        assert_eq!(arith.add(4, 5), 3);
    }
}
