//! The [`Session`]: one arena plus every value operation over it.
//!
//! All values of a session live in its arena and are reached through the
//! session. Between [`Session::teardown`] and [`Session::reinit`] every
//! operation fails with [`ArenaError::Uninitialised`](lanecarry_arena::ArenaError).

use std::cmp::Ordering;

use lanecarry_arena::{ArenaConfig, LimbArena, LimbHandle, Release};
use lanecarry_core::{KernelError, Limb};
use lanecarry_kernel::chain::check_operands;
use lanecarry_kernel::{approx, exact, Approx, CarryChain, Exact};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::error::LimbError;
use crate::hex::{format_limbs, HexLiteral};
use crate::value::LimbInt;

/// Raw add/sub entry point: writes `out`, returns the carry or borrow.
type WordOp = fn(&mut [Limb], &[Limb], &[Limb]) -> Result<u64, KernelError>;

/// Raw larger-minus-smaller entry point.
type MagnitudeOp = fn(&mut [Limb], &[Limb], &[Limb]) -> Result<Ordering, KernelError>;

/// Limbs copied on the stack while a value is regrown.
type ResizeScratch = SmallVec<[Limb; 16]>;

/// An arena session.
///
/// Single-threaded: every operation takes `&mut self` or `&self`, so the
/// borrow checker rules out concurrent use of one arena.
pub struct Session {
    arena: LimbArena,
}

impl Session {
    /// Start a session with the default arena configuration.
    pub fn new() -> Result<Self, LimbError> {
        Self::init(ArenaConfig::default())
    }

    /// Start a session with a custom arena configuration.
    ///
    /// Returns `Err(LimbError::Arena(ArenaError::InvalidConfig))` if the
    /// configuration is rejected.
    pub fn init(config: ArenaConfig) -> Result<Self, LimbError> {
        let arena = LimbArena::initialised(config)?;
        debug!(
            capacity_bytes = arena.capacity_bytes(),
            align_limbs = arena.config().align_limbs,
            "session started"
        );
        Ok(Self { arena })
    }

    /// End the session. Every value issued so far becomes unusable.
    pub fn teardown(&mut self) -> Result<(), LimbError> {
        self.arena.teardown()?;
        debug!(epoch = self.arena.epoch().0, "session torn down");
        Ok(())
    }

    /// Start a new session on a torn-down one, reusing its configuration.
    pub fn reinit(&mut self) -> Result<(), LimbError> {
        self.arena.init()?;
        debug!(epoch = self.arena.epoch().0, "session restarted");
        Ok(())
    }

    /// Whether the session is between start and teardown.
    pub fn is_active(&self) -> bool {
        self.arena.is_initialised()
    }

    /// The backing arena, for statistics and diagnostics.
    pub fn arena(&self) -> &LimbArena {
        &self.arena
    }

    // ── Value lifecycle ────────────────────────────────────────────

    /// Allocate a zero value of `size` limbs.
    pub fn allocate(&mut self, size: usize) -> Result<LimbInt, LimbError> {
        if size == 0 {
            return Err(LimbError::ZeroSize);
        }
        let handle = self.arena.alloc(size)?;
        Ok(LimbInt::new(handle))
    }

    /// Allocate a value holding a copy of `limbs` (least significant first).
    pub fn from_limbs(&mut self, limbs: &[Limb]) -> Result<LimbInt, LimbError> {
        let value = self.allocate(limbs.len())?;
        self.limbs_mut(&value)?.copy_from_slice(limbs);
        Ok(value)
    }

    /// The limbs of `value`, least significant first.
    pub fn limbs<'s>(&'s self, value: &LimbInt) -> Result<&'s [Limb], LimbError> {
        match &value.handle {
            Some(handle) => Ok(self.arena.limbs(handle)?),
            None => Ok(&[]),
        }
    }

    fn limbs_mut(&mut self, value: &LimbInt) -> Result<&mut [Limb], LimbError> {
        match &value.handle {
            Some(handle) => Ok(self.arena.limbs_mut(handle)?),
            None => Ok(&mut []),
        }
    }

    /// Copy the limbs of `value` out of the arena.
    pub fn to_limbs(&self, value: &LimbInt) -> Result<Vec<Limb>, LimbError> {
        Ok(self.limbs(value)?.to_vec())
    }

    /// Whether `value` is numerically zero (sign ignored, carry counted).
    pub fn is_zero(&self, value: &LimbInt) -> Result<bool, LimbError> {
        Ok(!value.carry && self.limbs(value)?.iter().all(|&l| l == 0))
    }

    /// Change the limb count of `value`, keeping its low limbs.
    ///
    /// Growing zero-extends: the old limbs are saved, the old buffer is
    /// released, and a fresh buffer receives them. The release may recycle
    /// the arena, which leaves `value` valid but retires every other value
    /// of the session. Shrinking narrows the buffer in place and never
    /// recycles. Shrinking to zero releases the buffer.
    pub fn resize(&mut self, value: &mut LimbInt, size: usize) -> Result<(), LimbError> {
        if size == value.size {
            return Ok(());
        }
        let Some(handle) = value.handle else {
            let grown = self.arena.alloc(size)?;
            value.handle = Some(grown);
            value.size = size;
            return Ok(());
        };

        if size == 0 {
            self.arena.release(handle)?;
            value.handle = None;
            value.size = 0;
            trace!(from = handle.len(), "value released by resize to zero");
            return Ok(());
        }

        if size < value.size {
            value.handle = Some(self.arena.truncate(&handle, size)?);
            value.size = size;
            trace!(from = handle.len(), to = size, "value narrowed");
            return Ok(());
        }

        let saved = ResizeScratch::from_slice(self.arena.limbs(&handle)?);
        let outcome = self.arena.release(handle)?;
        let grown = self.arena.alloc(size)?;
        self.arena.limbs_mut(&grown)?[..saved.len()].copy_from_slice(&saved);
        value.handle = Some(grown);
        value.size = size;
        trace!(from = saved.len(), to = size, ?outcome, "value grown");
        Ok(())
    }

    /// Zero-extend the shorter of `a` and `b` to the longer one's size.
    pub fn reconcile_sizes(&mut self, a: &mut LimbInt, b: &mut LimbInt) -> Result<(), LimbError> {
        match a.size.cmp(&b.size) {
            Ordering::Equal => Ok(()),
            Ordering::Less => self.resize(a, b.size),
            Ordering::Greater => self.resize(b, a.size),
        }
    }

    /// Give `value`'s buffer back to the arena.
    ///
    /// See [`LimbArena::release`]: this may recycle the arena and retire
    /// every other value.
    pub fn release(&mut self, value: LimbInt) -> Result<Release, LimbError> {
        match value.handle {
            Some(handle) => Ok(self.arena.release(handle)?),
            None => Ok(Release::Deferred),
        }
    }

    // ── Hex interchange ────────────────────────────────────────────

    /// Parse a hex literal: optional `-`, optional whitespace, hex digits.
    ///
    /// The value gets `ceil(digits / 16)` limbs, leading zero digits
    /// included.
    pub fn parse_hex(&mut self, text: &str) -> Result<LimbInt, LimbError> {
        let literal = HexLiteral::scan(text)?;
        let mut value = self.allocate(literal.limb_count())?;
        literal.write_limbs(self.limbs_mut(&value)?);
        value.sign = literal.sign;
        trace!(limbs = value.size, sign = value.sign, "hex parsed");
        Ok(value)
    }

    /// Render `value` as lower-case hex with no leading zeros.
    ///
    /// A set carry is shown as an extra leading `1` digit.
    pub fn format_hex(&self, value: &LimbInt) -> Result<String, LimbError> {
        Ok(format_limbs(value.sign, value.carry, self.limbs(value)?))
    }

    // ── Arithmetic ─────────────────────────────────────────────────

    /// `result = |a| + |b|`, exactly. Sets `result.carry` on overflow.
    ///
    /// `a` and `b` must have the same size (see
    /// [`reconcile_sizes`](Self::reconcile_sizes)); `result` must have at
    /// least that many limbs and is narrowed to exactly that many.
    pub fn add(&mut self, result: &mut LimbInt, a: &LimbInt, b: &LimbInt) -> Result<(), LimbError> {
        self.add_with::<Exact>(result, a, b, exact::add_words)
    }

    /// `result = |a| - |b|` as sign and magnitude, exactly.
    ///
    /// Equal magnitudes give canonical zero: one zero limb, positive.
    /// Otherwise `result` holds the larger magnitude minus the smaller,
    /// negative iff `|a| < |b|`. Input signs are ignored.
    pub fn sub(&mut self, result: &mut LimbInt, a: &LimbInt, b: &LimbInt) -> Result<(), LimbError> {
        self.sub_with::<Exact>(result, a, b, exact::sub_magnitudes)
    }

    /// Approximate [`add`](Self::add): a carry that must pass through a
    /// saturated limb is dropped. Never use the result where an exact
    /// value is expected.
    pub fn add_approx(
        &mut self,
        result: &mut LimbInt,
        a: &LimbInt,
        b: &LimbInt,
    ) -> Result<(), LimbError> {
        self.add_with::<Approx>(result, a, b, approx::add_words)
    }

    /// Approximate [`sub`](Self::sub). The magnitude comparison and the
    /// result sign are exact; the borrow chain is not.
    pub fn sub_approx(
        &mut self,
        result: &mut LimbInt,
        a: &LimbInt,
        b: &LimbInt,
    ) -> Result<(), LimbError> {
        self.sub_with::<Approx>(result, a, b, approx::sub_magnitudes)
    }

    /// Check sizes and narrow `result` to the operand size.
    fn prepare(&mut self, result: &mut LimbInt, a: &LimbInt, b: &LimbInt) -> Result<usize, LimbError> {
        let n = check_operands(result.size, a.size, b.size)?;
        if n > 0 && result.size > n {
            self.resize(result, n)?;
        }
        Ok(n)
    }

    fn operands(
        &mut self,
        result: &LimbInt,
        a: &LimbInt,
        b: &LimbInt,
    ) -> Result<(&mut [Limb], &[Limb], &[Limb]), LimbError> {
        let (out, lhs, rhs) = (handle_of(result)?, handle_of(a)?, handle_of(b)?);
        Ok(self.arena.split_mut(&out, &lhs, &rhs)?)
    }

    fn add_with<C: CarryChain>(
        &mut self,
        result: &mut LimbInt,
        a: &LimbInt,
        b: &LimbInt,
        op: WordOp,
    ) -> Result<(), LimbError> {
        let n = self.prepare(result, a, b)?;
        let carry = if n == 0 {
            0
        } else {
            let (out, lhs, rhs) = self.operands(result, a, b)?;
            op(out, lhs, rhs)?
        };
        result.carry = carry != 0;
        result.sign = false;
        trace!(
            policy = C::NAME,
            exact = C::EXACT,
            limbs = n,
            carry = result.carry,
            "add"
        );
        Ok(())
    }

    fn sub_with<C: CarryChain>(
        &mut self,
        result: &mut LimbInt,
        a: &LimbInt,
        b: &LimbInt,
        op: MagnitudeOp,
    ) -> Result<(), LimbError> {
        let n = self.prepare(result, a, b)?;
        result.carry = false;
        result.sign = false;
        if n == 0 {
            return Ok(());
        }
        let ordering = {
            let (out, lhs, rhs) = self.operands(result, a, b)?;
            op(out, lhs, rhs)?
        };
        match ordering {
            Ordering::Equal => self.resize(result, 1)?,
            Ordering::Less => result.sign = true,
            Ordering::Greater => {}
        }
        trace!(policy = C::NAME, exact = C::EXACT, limbs = n, ?ordering, "sub");
        Ok(())
    }
}

fn handle_of(value: &LimbInt) -> Result<LimbHandle, LimbError> {
    value.handle.ok_or(LimbError::ZeroSize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanecarry_arena::ArenaError;
    use lanecarry_core::{ParseError, LIMB_MAX};

    fn session() -> Session {
        Session::init(ArenaConfig::new(1 << 16)).unwrap()
    }

    #[test]
    fn allocate_zero_size_rejected() {
        let mut s = session();
        assert_eq!(s.allocate(0), Err(LimbError::ZeroSize));
    }

    #[test]
    fn allocate_is_zeroed_and_positive() {
        let mut s = session();
        let v = s.allocate(3).unwrap();
        assert_eq!(v.size(), 3);
        assert!(!v.sign && !v.carry);
        assert_eq!(s.to_limbs(&v).unwrap(), vec![0, 0, 0]);
        assert!(s.is_zero(&v).unwrap());
    }

    #[test]
    fn resize_grows_with_zero_extension() {
        let mut s = session();
        let mut v = s.from_limbs(&[7, 8]).unwrap();
        s.resize(&mut v, 5).unwrap();
        assert_eq!(s.to_limbs(&v).unwrap(), vec![7, 8, 0, 0, 0]);
    }

    #[test]
    fn resize_shrinks_keeping_low_limbs() {
        let mut s = session();
        let mut v = s.from_limbs(&[7, 8, 9]).unwrap();
        s.resize(&mut v, 1).unwrap();
        assert_eq!(s.to_limbs(&v).unwrap(), vec![7]);
        s.resize(&mut v, 0).unwrap();
        assert!(v.is_empty());
        assert!(v.handle().is_none());
        s.resize(&mut v, 2).unwrap();
        assert_eq!(s.to_limbs(&v).unwrap(), vec![0, 0]);
    }

    #[test]
    fn reconcile_pads_shorter_operand() {
        let mut s = session();
        let mut a = s.parse_hex("1").unwrap();
        let mut b = s.parse_hex(&"f".repeat(40)).unwrap();
        s.reconcile_sizes(&mut a, &mut b).unwrap();
        assert_eq!(a.size(), 3);
        assert_eq!(b.size(), 3);
        assert_eq!(s.format_hex(&a).unwrap(), "1");
    }

    #[test]
    fn parse_errors_surface_as_values() {
        let mut s = session();
        assert_eq!(s.parse_hex(""), Err(LimbError::Parse(ParseError::Empty)));
        assert!(matches!(
            s.parse_hex("12x"),
            Err(LimbError::Parse(ParseError::InvalidDigit { found: 'x', .. }))
        ));
    }

    #[test]
    fn parsed_negative_zero_is_positive() {
        let mut s = session();
        let z = s.parse_hex("-0000").unwrap();
        assert!(!z.sign);
        assert!(s.is_zero(&z).unwrap());
        assert_eq!(s.format_hex(&z).unwrap(), "0");
    }

    #[test]
    fn add_sets_carry_on_overflow() {
        let mut s = session();
        let a = s.from_limbs(&[LIMB_MAX; 16]).unwrap();
        let b = s.from_limbs(&lanecarry_test_utils::fixtures::one(16)).unwrap();
        let mut r = s.allocate(16).unwrap();
        s.add(&mut r, &a, &b).unwrap();
        assert!(r.carry);
        assert_eq!(s.to_limbs(&r).unwrap(), vec![0; 16]);
        assert_eq!(s.format_hex(&r).unwrap(), format!("1{}", "0".repeat(256)));
    }

    #[test]
    fn add_narrows_oversized_result() {
        let mut s = session();
        let a = s.from_limbs(&[1, 2]).unwrap();
        let b = s.from_limbs(&[3, 4]).unwrap();
        let mut r = s.allocate(6).unwrap();
        s.add(&mut r, &a, &b).unwrap();
        assert_eq!(r.size(), 2);
        assert_eq!(s.to_limbs(&r).unwrap(), vec![4, 6]);
    }

    #[test]
    fn add_rejects_unreconciled_operands() {
        let mut s = session();
        let a = s.from_limbs(&[1, 2]).unwrap();
        let b = s.from_limbs(&[3]).unwrap();
        let mut r = s.allocate(2).unwrap();
        assert_eq!(
            s.add(&mut r, &a, &b),
            Err(LimbError::Kernel(KernelError::LengthMismatch { lhs: 2, rhs: 1 }))
        );
        let b = s.from_limbs(&[3, 4]).unwrap();
        let mut small = s.allocate(1).unwrap();
        assert_eq!(
            s.add(&mut small, &a, &b),
            Err(LimbError::Kernel(KernelError::ResultTooShort {
                required: 2,
                available: 1
            }))
        );
    }

    #[test]
    fn sub_equal_is_canonical_zero() {
        let mut s = session();
        let a = s.parse_hex("-abcdef0123456789abcdef").unwrap();
        let b = s.parse_hex("abcdef0123456789abcdef").unwrap();
        let mut r = s.allocate(2).unwrap();
        s.sub(&mut r, &a, &b).unwrap();
        assert_eq!(r.size(), 1);
        assert!(!r.sign);
        assert_eq!(s.to_limbs(&r).unwrap(), vec![0]);
        assert_eq!(s.format_hex(&r).unwrap(), "0");
    }

    #[test]
    fn sub_smaller_first_is_negative() {
        let mut s = session();
        let a = s.parse_hex("5").unwrap();
        let b = s.parse_hex("8").unwrap();
        let mut r = s.allocate(1).unwrap();
        s.sub(&mut r, &a, &b).unwrap();
        assert!(r.sign);
        assert_eq!(s.format_hex(&r).unwrap(), "-3");
    }

    #[test]
    fn sub_clears_a_stale_carry() {
        let mut s = session();
        let a = s.from_limbs(&[LIMB_MAX]).unwrap();
        let b = s.from_limbs(&[1]).unwrap();
        let mut r = s.allocate(1).unwrap();
        s.add(&mut r, &a, &b).unwrap();
        assert!(r.carry);
        s.sub(&mut r, &a, &b).unwrap();
        assert!(!r.carry);
        assert_eq!(s.format_hex(&r).unwrap(), "fffffffffffffffe");
    }

    #[test]
    fn teardown_blocks_every_operation_until_reinit() {
        let mut s = session();
        let v = s.parse_hex("ff").unwrap();
        s.teardown().unwrap();
        assert!(!s.is_active());
        assert_eq!(s.allocate(1), Err(LimbError::Arena(ArenaError::Uninitialised)));
        assert_eq!(s.format_hex(&v), Err(LimbError::Arena(ArenaError::Uninitialised)));

        s.reinit().unwrap();
        assert!(matches!(
            s.format_hex(&v),
            Err(LimbError::Arena(ArenaError::StaleHandle { .. }))
        ));
        assert!(s.allocate(1).is_ok());
    }

    #[test]
    fn release_of_empty_value_is_a_no_op() {
        let mut s = session();
        let mut v = s.allocate(2).unwrap();
        s.resize(&mut v, 0).unwrap();
        assert_eq!(s.release(v), Ok(Release::Deferred));
    }
}
