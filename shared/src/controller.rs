//! Drives a [`SessionsView`] against a [`ManagementBridge`].
//!
//! Each interaction awaits its fetch before returning, so at most one
//! request is outstanding. UIs that spawn fetches concurrently use the view
//! directly and rely on its generation check instead.

use crate::api::ManagementBridge;
use crate::filter::{FilterField, FilterOperation, SortState};
use crate::navigation::Navigation;
use crate::paging::PageSize;
use crate::sessions_view::{FetchOutcome, FetchRequest, RowAction, SessionsView, ViewError};

pub struct SessionsController<B> {
    bridge: B,
    view: SessionsView,
}

impl<B: ManagementBridge> SessionsController<B> {
    pub fn new(bridge: B, view: SessionsView) -> Self {
        Self { bridge, view }
    }

    pub fn view(&self) -> &SessionsView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut SessionsView {
        &mut self.view
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn into_view(self) -> SessionsView {
        self.view
    }

    /// Run a request (and any follow-up it produces) to completion.
    ///
    /// Returns `None` when there was nothing to fetch.
    async fn run(&mut self, mut request: Option<FetchRequest>) -> Option<FetchOutcome> {
        let mut last = None;
        while let Some(FetchRequest { ticket, exec }) = request.take() {
            let result = self.bridge.exec(&exec).await;
            let outcome = self.view.complete(ticket, result);
            if let FetchOutcome::Applied { follow_up } = &outcome {
                request = follow_up.clone();
            }
            last = Some(outcome);
        }
        last
    }

    pub async fn initialize(&mut self) -> Option<FetchOutcome> {
        let request = self.view.initialize();
        self.run(request).await
    }

    pub async fn refresh(&mut self) -> Option<FetchOutcome> {
        let request = self.view.refresh();
        self.run(request).await
    }

    pub async fn fetch(&mut self) -> Option<FetchOutcome> {
        let request = self.view.fetch();
        self.run(request).await
    }

    pub async fn apply_filter(
        &mut self,
        field: FilterField,
        operation: FilterOperation,
        value: impl Into<String>,
    ) -> Option<FetchOutcome> {
        let request = self.view.apply_filter(field, operation, value);
        self.run(request).await
    }

    pub async fn reset_filter(&mut self) -> Option<FetchOutcome> {
        let request = self.view.reset_filter();
        self.run(request).await
    }

    pub async fn change_page(&mut self, page: u32) -> Option<FetchOutcome> {
        let request = self.view.change_page(page);
        self.run(request).await
    }

    pub async fn change_page_input(&mut self, input: &str) -> Option<FetchOutcome> {
        let request = self.view.change_page_input(input);
        self.run(request).await
    }

    pub async fn change_page_size(&mut self, size: PageSize) -> Option<FetchOutcome> {
        let request = self.view.change_page_size(size);
        self.run(request).await
    }

    pub async fn select_page_size(&mut self, size: PageSize) -> Option<FetchOutcome> {
        let request = self.view.select_page_size(size);
        self.run(request).await
    }

    pub async fn set_sort(&mut self, sort: SortState) -> Option<FetchOutcome> {
        let request = self.view.set_sort(sort);
        self.run(request).await
    }

    pub fn on_row_action(&mut self, action: RowAction, row: usize) -> Result<Navigation, ViewError> {
        self.view.on_row_action(action, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ManagementError;
    use crate::filter::{SortColumn, SortDirection};
    use crate::jolokia::ExecRequest;
    use crate::navigation::{NavigationContext, WorkspaceSelection};
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Records every exec and answers from a scripted queue.
    /// An empty queue answers with a one-row page.
    #[derive(Default)]
    struct RecordingBridge {
        calls: RefCell<Vec<ExecRequest>>,
        replies: RefCell<VecDeque<Result<serde_json::Value, ManagementError>>>,
    }

    impl RecordingBridge {
        fn push_reply(&self, reply: Result<serde_json::Value, ManagementError>) {
            self.replies.borrow_mut().push_back(reply);
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }

        fn last_args(&self) -> Vec<serde_json::Value> {
            self.calls.borrow().last().unwrap().arguments.clone()
        }
    }

    impl ManagementBridge for RecordingBridge {
        async fn exec(&self, request: &ExecRequest) -> Result<serde_json::Value, ManagementError> {
            self.calls.borrow_mut().push(request.clone());
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(page(1, 1)))
        }
    }

    fn page(rows: usize, count: u64) -> serde_json::Value {
        let data: Vec<_> = (0..rows)
            .map(|i| {
                json!({
                    "id": format!("session-{}", i),
                    "connectionID": format!("conn-{}", i),
                    "user": "alice",
                    "consumerCount": 1,
                    "producerCount": 1,
                    "creationTime": "2024-05-01 12:00:00"
                })
            })
            .collect();
        json!(json!({ "data": data, "count": count }).to_string())
    }

    fn controller() -> SessionsController<RecordingBridge> {
        let view = SessionsView::activate(
            WorkspaceSelection::for_broker("org.apache.activemq.artemis", "0.0.0.0"),
            NavigationContext::default(),
        );
        SessionsController::new(RecordingBridge::default(), view)
    }

    #[tokio::test]
    async fn initial_load_requests_first_page() {
        let mut ctl = controller();
        ctl.bridge().push_reply(Ok(page(3, 3)));
        ctl.initialize().await;

        assert_eq!(ctl.bridge().call_count(), 1);
        let args = ctl.bridge().last_args();
        assert_eq!(args[1], json!(1));
        assert_eq!(args[2], json!(100));
        assert_eq!(ctl.view().rows().len(), 3);
        assert_eq!(ctl.view().total(), 3);
    }

    #[tokio::test]
    async fn every_valid_page_and_size_is_requested_verbatim() {
        let mut ctl = controller();
        ctl.initialize().await;

        for size in PageSize::ALL {
            for page_no in [2u32, 7, 3] {
                ctl.change_page_size(size).await;
                ctl.change_page(page_no).await;
                let args = ctl.bridge().last_args();
                assert_eq!(args[1], json!(page_no));
                assert_eq!(args[2], json!(size.get()));
            }
            ctl.change_page(1).await;
        }
    }

    #[tokio::test]
    async fn unchanged_sort_or_page_does_not_refetch() {
        let mut ctl = controller();
        ctl.initialize().await;
        assert_eq!(ctl.bridge().call_count(), 1);

        assert!(ctl.change_page(1).await.is_none());
        assert!(ctl.set_sort(SortState::default()).await.is_none());
        assert!(ctl.change_page_input("abc").await.is_none());
        assert_eq!(ctl.bridge().call_count(), 1);

        ctl.set_sort(SortState::new(SortColumn::User, SortDirection::Desc))
            .await;
        assert_eq!(ctl.bridge().call_count(), 2);
        ctl.change_page(2).await;
        assert_eq!(ctl.bridge().call_count(), 3);
    }

    #[tokio::test]
    async fn filter_round_trip() {
        let mut ctl = controller();
        ctl.initialize().await;
        ctl.change_page(5).await;

        ctl.apply_filter(FilterField::User, FilterOperation::Contains, "alice")
            .await;
        let args = ctl.bridge().last_args();
        let filter: serde_json::Value = serde_json::from_str(args[0].as_str().unwrap()).unwrap();
        assert_eq!(filter["field"], "USER");
        assert_eq!(filter["operation"], "CONTAINS");
        assert_eq!(filter["value"], "alice");
        assert_eq!(args[1], json!(1));

        ctl.reset_filter().await;
        let args = ctl.bridge().last_args();
        let filter: serde_json::Value = serde_json::from_str(args[0].as_str().unwrap()).unwrap();
        assert_eq!(filter["field"], "");
        assert_eq!(filter["value"], "");
    }

    #[tokio::test]
    async fn rejected_call_leaves_rows_alone() {
        let mut ctl = controller();
        ctl.bridge().push_reply(Ok(page(4, 4)));
        ctl.initialize().await;
        ctl.view_mut().take_notifications();

        ctl.bridge().push_reply(Err(ManagementError::Server {
            status: 500,
            message: "boom".to_string(),
        }));
        let outcome = ctl.refresh().await;
        assert!(matches!(outcome, Some(FetchOutcome::Failed(_))));
        assert_eq!(ctl.view().rows().len(), 4);
        assert_eq!(ctl.view().total(), 4);

        let notes = ctl.view_mut().take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].resource, "sessions");
    }

    #[tokio::test]
    async fn refresh_on_later_page_refetches_first_page() {
        let mut ctl = controller();
        ctl.bridge().push_reply(Ok(page(1, 900)));
        ctl.initialize().await;
        ctl.change_page(4).await;
        assert_eq!(ctl.bridge().call_count(), 2);

        ctl.refresh().await;
        let calls = ctl.bridge().calls.borrow().clone();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[2].arguments[1], json!(4));
        assert_eq!(calls[3].arguments[1], json!(1));
        assert_eq!(ctl.view().paging().current_page, 1);
    }

    #[tokio::test]
    async fn connection_click_navigates_with_connection_id() {
        let mut ctl = controller();
        ctl.bridge().push_reply(Ok(page(2, 2)));
        ctl.initialize().await;

        let nav = ctl.on_row_action(RowAction::Connection, 0).unwrap();
        assert_eq!(nav.context.connection.as_deref(), Some("conn-0"));
        assert_eq!(nav.target.path(), "/artemis/connections");

        assert!(matches!(
            ctl.on_row_action(RowAction::Consumers, 0),
            Err(ViewError::Unsupported(_))
        ));
    }
}
