// Page lifecycle decisions. Pure, wired up in `mod.rs`.

/// Whether a `pagehide` should tear the tour down. A page kept in the
/// back/forward cache (`persisted`) is restored live and keeps its session.
#[inline]
pub fn should_unmount(persisted: bool) -> bool {
    !persisted
}
