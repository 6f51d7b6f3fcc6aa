use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{Notification, NotificationFilter, NotificationQuery};
use crate::pages::{PageAlerts, TableView};
use crate::services::NotificationService;

/// Paginated notification inbox with all/unread/read tabs
pub struct NotificationListPage {
    service: NotificationService,
    pub tab: NotificationFilter,
    /// 1-based
    pub page: u32,
    pub per_page: u32,
    pub items: Vec<Notification>,
    pub total: u64,
    pub unread_count: u64,
    pub loading: bool,
    pub alerts: PageAlerts,
}

impl NotificationListPage {
    pub fn new(client: ApiClient) -> Self {
        let per_page = client.config().notifications_per_page.max(1);
        Self {
            service: NotificationService::new(client),
            tab: NotificationFilter::All,
            page: 1,
            per_page,
            items: Vec::new(),
            total: 0,
            unread_count: 0,
            loading: false,
            alerts: PageAlerts::default(),
        }
    }

    pub async fn load(&mut self) {
        let query = NotificationQuery {
            page: self.page,
            per_page: self.per_page,
            filter: self.tab,
        };

        self.loading = true;
        let result = self.service.list(&query).await;
        self.loading = false;

        match result {
            Ok(page) => {
                self.items = page.items;
                self.total = page.total;
                self.unread_count = page.unread_count;
                self.alerts.dismiss_error();
            }
            Err(err) => self.alerts.fail("Failed to load notifications", &err),
        }
    }

    /// Changing tab starts again from the first page
    pub async fn set_tab(&mut self, tab: NotificationFilter) {
        self.tab = tab;
        self.page = 1;
        self.load().await;
    }

    pub async fn go_to_page(&mut self, page: u32) {
        self.page = page.max(1);
        self.load().await;
    }

    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(self.per_page as u64);
        pages.max(1) as u32
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    pub fn rows(&self) -> TableView<Notification> {
        TableView::from_rows(self.loading, self.items.clone(), "No notifications")
    }

    pub async fn mark_read(&mut self, id: Uuid) -> ClientResult<()> {
        let result = self.service.mark_read(id).await;
        self.after_mutation(result, "Failed to mark notification as read")
            .await
    }

    pub async fn mark_unread(&mut self, id: Uuid) -> ClientResult<()> {
        let result = self.service.mark_unread(id).await;
        self.after_mutation(result, "Failed to mark notification as unread")
            .await
    }

    pub async fn mark_all_read(&mut self) -> ClientResult<()> {
        let result = self.service.mark_all_read().await;
        if result.is_ok() {
            self.alerts.succeed("All notifications marked as read");
        }
        self.after_mutation(result, "Failed to mark all notifications as read")
            .await
    }

    async fn after_mutation(&mut self, result: ClientResult<()>, context: &str) -> ClientResult<()> {
        match result {
            Ok(()) => {
                self.load().await;
                Ok(())
            }
            Err(err) => {
                self.alerts.fail(context, &err);
                Err(err)
            }
        }
    }
}
