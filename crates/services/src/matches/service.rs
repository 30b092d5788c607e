use std::sync::Arc;

use quiz_core::ContentCatalog;
use quiz_core::model::SubthemeId;
use quiz_core::validation::validated_bands;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::allocation::{Allocation, allocate};
use super::selection::{MatchRequest, MatchSelection, SelectedQuestion};
use crate::Entropy;
use crate::error::SelectionError;

/// Assembles matches from a loaded catalog.
///
/// Holds the catalog behind an `Arc` and never mutates it, so one service can
/// serve any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct MatchService {
    catalog: Arc<ContentCatalog>,
    entropy: Entropy,
}

impl MatchService {
    #[must_use]
    pub fn new(catalog: Arc<ContentCatalog>, entropy: Entropy) -> Self {
        Self { catalog, entropy }
    }

    #[must_use]
    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    /// Per-band counts a match of `size` would use, without drawing anything.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError` for an empty size, an unknown subtheme, or a
    /// subtheme failing validation.
    pub fn allocation(&self, subtheme: SubthemeId, size: usize) -> Result<Allocation, SelectionError> {
        if size == 0 {
            return Err(SelectionError::InvalidMatchSize);
        }
        let entry = self.catalog.subtheme(subtheme)?;
        let bands = validated_bands(&self.catalog, entry)?;
        Ok(allocate(&bands, size))
    }

    /// Select a match for a subtheme.
    ///
    /// `seed` pins the draw for this call; otherwise the service's configured
    /// entropy is used.
    ///
    /// # Errors
    ///
    /// See [`MatchService::select_match_with_rng`].
    pub fn select_match(
        &self,
        subtheme: SubthemeId,
        size: usize,
        seed: Option<u64>,
    ) -> Result<MatchSelection, SelectionError> {
        let mut rng = self.entropy.with_override(seed).rng();
        self.select_match_with_rng(subtheme, size, &mut rng)
    }

    /// Select a match for a subtheme, drawing from `rng`.
    ///
    /// - Validates the subtheme's difficulty configuration first.
    /// - Fails with `InsufficientQuestions` when any band cannot cover its
    ///   count; nothing is drawn in that case.
    /// - Draws without replacement inside each band.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError::InvalidMatchSize`, `NotFound`, `Config` or
    /// `InsufficientQuestions`.
    pub fn select_match_with_rng<R: Rng + ?Sized>(
        &self,
        subtheme: SubthemeId,
        size: usize,
        rng: &mut R,
    ) -> Result<MatchSelection, SelectionError> {
        if size == 0 {
            return Err(SelectionError::InvalidMatchSize);
        }
        let entry = self.catalog.subtheme(subtheme)?;
        let bands = validated_bands(&self.catalog, entry).inspect_err(|err| {
            tracing::debug!(%err, "subtheme rejected by validation");
        })?;
        let allocation = allocate(&bands, size);
        tracing::debug!(
            %subtheme,
            size,
            easy = allocation.bands()[0].count,
            medium = allocation.bands()[1].count,
            hard = allocation.bands()[2].count,
            "allocated match"
        );

        if let Some(short) = allocation.first_shortfall() {
            tracing::debug!(
                %subtheme,
                level = %short.level,
                requested = short.count,
                available = short.available,
                "not enough questions"
            );
            return Err(SelectionError::InsufficientQuestions {
                subtheme,
                level: short.level,
                requested: short.count,
                available: short.available,
            });
        }

        let mut questions = Vec::with_capacity(size);
        for (band, slot) in bands.iter().zip(allocation.bands()) {
            for id in band.question_ids().choose_multiple(rng, slot.count) {
                let question = self.catalog.question(*id)?;
                questions.push(SelectedQuestion::new(band.level(), question));
            }
        }

        Ok(MatchSelection {
            subtheme,
            allocation,
            questions,
        })
    }

    /// Select a match for a (theme, subtheme, size) request.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown theme, `SubthemeNotInTheme` when the
    /// theme does not list the subtheme, and otherwise anything
    /// [`MatchService::select_match`] returns.
    pub fn assemble(&self, request: &MatchRequest) -> Result<MatchSelection, SelectionError> {
        if !self.catalog.theme_contains(request.theme, request.subtheme)? {
            return Err(SelectionError::SubthemeNotInTheme {
                theme: request.theme,
                subtheme: request.subtheme,
            });
        }
        self.select_match(request.subtheme, request.size, request.seed)
    }
}
