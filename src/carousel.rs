//! Carousel traversal.
//!
//! The job-card carousel exposes exactly one selected item's name at a
//! time plus a "next" control, so the only way to search or enumerate
//! it is read-advance-read. Both walks are bounded by an initial count
//! probe; a vanished next control means the final card was reached and
//! stops the walk early rather than erroring.

use crate::error::{AutomationError, Result};

/// A view over one "selected item + next control" widget.
#[allow(async_fn_in_trait)]
pub trait Carousel {
    /// Upper bound on how many items the carousel holds.
    async fn total(&self) -> Result<usize>;
    /// Display name of the currently selected item.
    async fn current_name(&self) -> Result<String>;
    /// Whether a "next" control is currently on the page.
    async fn has_next(&self) -> Result<bool>;
    /// Activates the "next" control.
    async fn advance(&self) -> Result<()>;
    /// Acts on the currently selected item.
    async fn select_current(&self) -> Result<()>;
    /// Display name at a 1-based position of the selected card.
    async fn name_at(&self, index: usize) -> Result<String>;
}

/// Walks the carousel until the target name is selected, then acts on
/// it. Each activation of the next control counts as one attempt; the
/// walk gives up after `total()` attempts or as soon as the next
/// control is gone.
pub async fn find_and_select<C: Carousel>(carousel: &C, target: &str) -> Result<()> {
    let total = carousel.total().await?;
    let mut attempts = 0;

    while attempts < total {
        if carousel.current_name().await? == target {
            carousel.select_current().await?;
            return Ok(());
        }

        if carousel.has_next().await? {
            carousel.advance().await?;
            attempts += 1;
        } else {
            break;
        }
    }

    Err(AutomationError::UserNotFound {
        name: target.to_string(),
        attempts,
        total,
    })
}

/// Enumerates every item name in on-screen order: read the name at
/// position i, advance, repeat. N reads and N-1 advances for a carousel
/// of size N.
pub async fn collect_names<C: Carousel>(carousel: &C) -> Result<Vec<String>> {
    let total = carousel.total().await?;
    let mut names = Vec::with_capacity(total);

    for index in 1..=total {
        names.push(carousel.name_at(index).await?);
        if index < total && carousel.has_next().await? {
            carousel.advance().await?;
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    struct FakeCarousel {
        names: Vec<&'static str>,
        position: Cell<usize>,
        reads: Cell<usize>,
        advances: Cell<usize>,
        selected: RefCell<Option<String>>,
    }

    impl FakeCarousel {
        fn new(names: Vec<&'static str>) -> Self {
            Self {
                names,
                position: Cell::new(0),
                reads: Cell::new(0),
                advances: Cell::new(0),
                selected: RefCell::new(None),
            }
        }
    }

    impl Carousel for FakeCarousel {
        async fn total(&self) -> Result<usize> {
            Ok(self.names.len())
        }

        async fn current_name(&self) -> Result<String> {
            self.reads.set(self.reads.get() + 1);
            Ok(self.names[self.position.get()].to_string())
        }

        async fn has_next(&self) -> Result<bool> {
            Ok(self.position.get() + 1 < self.names.len())
        }

        async fn advance(&self) -> Result<()> {
            self.advances.set(self.advances.get() + 1);
            self.position.set(self.position.get() + 1);
            Ok(())
        }

        async fn select_current(&self) -> Result<()> {
            *self.selected.borrow_mut() = Some(self.names[self.position.get()].to_string());
            Ok(())
        }

        async fn name_at(&self, index: usize) -> Result<String> {
            self.reads.set(self.reads.get() + 1);
            Ok(self.names[index - 1].to_string())
        }
    }

    #[tokio::test]
    async fn match_at_initial_position_needs_zero_advances() {
        let carousel = FakeCarousel::new(vec!["Ana", "Bo", "Cleo"]);

        find_and_select(&carousel, "Ana").await.expect("found");

        assert_eq!(carousel.advances.get(), 0);
        assert_eq!(carousel.selected.borrow().as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn match_at_last_position_advances_to_it() {
        let carousel = FakeCarousel::new(vec!["Ana", "Bo", "Cleo"]);

        find_and_select(&carousel, "Cleo").await.expect("found");

        assert_eq!(carousel.advances.get(), 2);
        assert_eq!(carousel.selected.borrow().as_deref(), Some("Cleo"));
    }

    #[tokio::test]
    async fn absent_target_reports_advances_made() {
        let carousel = FakeCarousel::new(vec!["Ana", "Bo", "Cleo"]);

        let err = find_and_select(&carousel, "Zed")
            .await
            .expect_err("must not match");

        match err {
            AutomationError::UserNotFound {
                name,
                attempts,
                total,
            } => {
                assert_eq!(name, "Zed");
                // The next control vanishes on the last card.
                assert_eq!(attempts, 2);
                assert_eq!(attempts, carousel.advances.get());
                assert_eq!(total, 3);
            }
            other => panic!("expected UserNotFound, got {other}"),
        }
        assert!(carousel.selected.borrow().is_none());
    }

    #[tokio::test]
    async fn empty_carousel_fails_without_advancing() {
        let carousel = FakeCarousel::new(vec![]);

        let err = find_and_select(&carousel, "Ana")
            .await
            .expect_err("nothing to match");

        match err {
            AutomationError::UserNotFound {
                attempts, total, ..
            } => {
                assert_eq!(attempts, 0);
                assert_eq!(total, 0);
            }
            other => panic!("expected UserNotFound, got {other}"),
        }
    }

    #[tokio::test]
    async fn enumeration_does_n_reads_and_n_minus_one_advances() {
        let carousel = FakeCarousel::new(vec!["Ana", "Bo", "Cleo", "Dia"]);

        let names = collect_names(&carousel).await.expect("collect");

        assert_eq!(names, ["Ana", "Bo", "Cleo", "Dia"]);
        assert_eq!(carousel.reads.get(), 4);
        assert_eq!(carousel.advances.get(), 3);
    }

    #[tokio::test]
    async fn enumeration_of_empty_carousel_is_empty() {
        let carousel = FakeCarousel::new(vec![]);

        let names = collect_names(&carousel).await.expect("collect");

        assert!(names.is_empty());
        assert_eq!(carousel.reads.get(), 0);
        assert_eq!(carousel.advances.get(), 0);
    }
}
