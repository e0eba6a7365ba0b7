use crate::core::ranking::RankingContext;
use crate::core::types::{ColumnDescriptor, DatasetHandle, Selection};

/// Client-resident session context.
///
/// Pure data holder passed explicitly to every operation; mutation happens
/// only through the coordinator and pagination engine. There is no
/// server-authoritative session behind this.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Present iff an upload has succeeded
    dataset: Option<DatasetHandle>,

    /// Column catalog, in source order, immutable per dataset
    columns: Vec<ColumnDescriptor>,

    /// Last committed selection; provisional selections live in the
    /// coordinator until the analysis call settles
    selection: Option<Selection>,

    /// Active ranking pagination state, if any
    ranking: Option<RankingContext>,

    /// Re-entrancy guard: true while any outbound collaborator call is in
    /// flight. Gates initiation of new requests, never passive navigation.
    loading: bool,

    /// Stale-response guard. Bumped whenever the world a response was
    /// computed against stops existing (reset, new upload, kind switch);
    /// responses carrying an older epoch are discarded.
    epoch: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset(&self) -> Option<&DatasetHandle> {
        self.dataset.as_ref()
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Numeric columns are the only valid weighting choices
    pub fn weight_candidates(&self) -> Vec<&ColumnDescriptor> {
        self.columns
            .iter()
            .filter(|c| c.column_type == crate::core::types::ColumnType::Numeric)
            .collect()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn ranking(&self) -> Option<&RankingContext> {
        self.ranking.as_ref()
    }

    pub fn ranking_mut(&mut self) -> Option<&mut RankingContext> {
        self.ranking.as_mut()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Install a fresh dataset. Everything dependent on the old handle is
    /// cleared and the epoch advances so in-flight responses die stale.
    pub fn install_dataset(&mut self, handle: DatasetHandle, columns: Vec<ColumnDescriptor>) {
        self.reset();
        self.dataset = Some(handle);
        self.columns = columns;
    }

    pub fn commit_selection(&mut self, selection: Selection) {
        self.selection = Some(selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Restore the pre-attempt selection after a failed analysis
    pub fn rollback_selection(&mut self, previous: Option<Selection>) {
        self.selection = previous;
    }

    pub fn set_ranking(&mut self, ctx: RankingContext) {
        self.ranking = Some(ctx);
    }

    pub fn clear_ranking(&mut self) {
        self.ranking = None;
    }

    pub fn bump_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    /// Full session reset: dataset, catalog, selection, and ranking context
    /// all cleared. The loading flag is left to the operation that owns it.
    pub fn reset(&mut self) {
        self.dataset = None;
        self.columns.clear();
        self.selection = None;
        self.ranking = None;
        self.epoch += 1;
    }
}
