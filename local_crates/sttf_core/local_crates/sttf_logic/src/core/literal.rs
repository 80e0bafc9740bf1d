// sttf_logic
// Copyright (C) 2021  Univ. Artois & CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use crate::LogicError;
use std::{convert::TryFrom, fmt, str::FromStr};

/// A variable identifier, as used in DIMACS files.
///
/// It can be obtained from and converted into `usize`.
/// Identifiers read from text are strictly positive.
///
/// # Examples
///
/// ```
/// use sttf_logic::VarId;
///
/// assert_eq!(3, usize::from(VarId::from(3)));
/// assert_eq!(VarId::from(3), "3".parse().unwrap());
/// assert!("0".parse::<VarId>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct VarId(usize);

impl From<usize> for VarId {
    fn from(u: usize) -> Self {
        VarId(u)
    }
}

impl From<VarId> for usize {
    fn from(v: VarId) -> Self {
        v.0
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for VarId {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<usize>() {
            Ok(v) if v > 0 => Ok(VarId(v)),
            _ => Err(LogicError::InvalidVariable(s.to_string())),
        }
    }
}

/// A literal, composed by a [`VarId`] and a `bool` (its polarity).
///
/// Literals are written as nonzero signed integers: the magnitude is the variable,
/// a negative sign denotes a negative polarity.
///
/// # Order
///
/// A total order is imposed on literals:
/// * if variable identifiers are not equal, the same order applies to the literals;
/// * if variable identifiers are equal and polarity are different, the polarity (`bool`) order applies;
/// * if variable identifiers and polarity are equals, the two literals are equal.
///
/// # Examples
///
/// ```
/// use sttf_logic::{Literal, VarId};
///
/// let l: Literal = "-4".parse().unwrap();
/// assert_eq!(VarId::from(4), l.var_id());
/// assert!(!l.polarity());
/// assert_eq!("-4", l.to_string());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal(VarId, bool);

impl Literal {
    /// Builds a new literal, given its [`VarId`] and its polarity as a `bool`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sttf_logic::{VarId, Literal};
    ///
    /// let v = VarId::from(1);
    /// let l = Literal::new(v, true);
    /// let not_l = Literal::new(v, false);
    /// ```
    pub fn new(var_id: VarId, polarity: bool) -> Self {
        Literal(var_id, polarity)
    }

    /// Returns the negation of the literal, as a new `Literal`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sttf_logic::{VarId, Literal};
    ///
    /// let v = VarId::from(1);
    /// let l = Literal::new(v, true);
    /// let not_l = l.negate();
    /// assert_eq!(Literal::new(v, false), not_l)
    /// ```
    pub fn negate(&self) -> Self {
        Literal(self.0, !self.1)
    }

    /// Returns the [`VarId`] of this literal.
    pub fn var_id(&self) -> VarId {
        self.0
    }

    /// Returns the polarity of this literal.
    pub fn polarity(&self) -> bool {
        self.1
    }

    /// Returns a literal with the same polarity on another variable.
    ///
    /// # Examples
    ///
    /// ```
    /// use sttf_logic::{VarId, Literal};
    ///
    /// let l = Literal::new(VarId::from(3), false);
    /// assert_eq!(Literal::new(VarId::from(5), false), l.with_var_id(VarId::from(5)));
    /// ```
    pub fn with_var_id(&self, var_id: VarId) -> Self {
        Literal(var_id, self.1)
    }
}

impl TryFrom<i64> for Literal {
    type Error = LogicError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(LogicError::InvalidLiteral(value.to_string()));
        }
        Ok(Literal(VarId(value.unsigned_abs() as usize), value > 0))
    }
}

impl FromStr for Literal {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .parse::<i64>()
            .map_err(|_| LogicError::InvalidLiteral(s.to_string()))?;
        Literal::try_from(value).map_err(|_| LogicError::InvalidLiteral(s.to_string()))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.1 {
            write!(f, "-")?;
        }
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<(usize, bool)> for Literal {
    fn from(couple: (usize, bool)) -> Self {
        Literal::new(VarId::from(couple.0), couple.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate() {
        let lit = Literal::new(1.into(), false);
        let neg = lit.negate();
        assert!(neg.1);
    }

    #[test]
    fn test_eq() {
        let lit0 = Literal::new(1.into(), false);
        let lit1 = Literal::new(1.into(), false);
        let lit2 = Literal::new(1.into(), true);
        assert_eq!(lit0, lit1);
        assert_ne!(lit0, lit2);
    }

    #[test]
    fn test_sort() {
        let mut v = vec![
            Literal::new(2.into(), true),
            Literal::new(2.into(), false),
            Literal::new(1.into(), false),
            Literal::new(1.into(), true),
        ];
        v.sort_unstable();
        assert_eq!(
            vec![
                Literal::new(1.into(), false),
                Literal::new(1.into(), true),
                Literal::new(2.into(), false),
                Literal::new(2.into(), true)
            ],
            v
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(Literal::from((7, true)), "7".parse().unwrap());
        assert_eq!(Literal::from((7, false)), "-7".parse().unwrap());
    }

    #[test]
    fn test_parse_zero() {
        assert_eq!(
            LogicError::InvalidLiteral("0".to_string()),
            "0".parse::<Literal>().unwrap_err()
        );
        assert_eq!(
            LogicError::InvalidLiteral("-0".to_string()),
            "-0".parse::<Literal>().unwrap_err()
        );
    }

    #[test]
    fn test_parse_not_a_number() {
        assert_eq!(
            LogicError::InvalidLiteral("x1".to_string()),
            "x1".parse::<Literal>().unwrap_err()
        );
        assert_eq!(
            LogicError::InvalidVariable("-3".to_string()),
            "-3".parse::<VarId>().unwrap_err()
        );
    }

    #[test]
    fn test_with_var_id_keeps_polarity() {
        let l: Literal = "-3".parse().unwrap();
        assert_eq!("-10", l.with_var_id(10.into()).to_string());
        assert_eq!("10", l.negate().with_var_id(10.into()).to_string());
    }
}
