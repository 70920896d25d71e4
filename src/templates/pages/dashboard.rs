use crate::domain::Deal;
use crate::templates::components::{money, notice, percent, NoticeKind};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub const PAGE_TITLE: &str = "🏠 Real-Time Zillow Deal Finder";

pub struct DashboardVm {
    /// Local time of the fetch, `YYYY-MM-DD HH:MM:SS`.
    pub checked_at: String,
    pub threshold_percent: i64,
    pub fetch_error: Option<String>,
    /// Records returned by the source before filtering.
    pub fetched: usize,
    pub deals: Vec<Deal>,
    /// Result of a "Send Now" click, if this render follows one.
    pub notice: Option<(NoticeKind, String)>,
}

impl DashboardVm {
    fn has_data(&self) -> bool {
        self.fetch_error.is_none() && self.fetched > 0
    }
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    desktop_layout(
        PAGE_TITLE,
        html! {
            main class="container" {
                h1 { (PAGE_TITLE) }
                p class="caption" { "Last checked: " (vm.checked_at) }

                @if let Some(err) = &vm.fetch_error {
                    (notice(NoticeKind::Error, err))
                }

                @if vm.has_data() {
                    (notice(
                        NoticeKind::Success,
                        &format!(
                            "Found {} deals ≥ {}% below market",
                            vm.deals.len(),
                            vm.threshold_percent
                        ),
                    ))

                    @if let Some((kind, message)) = &vm.notice {
                        (notice(*kind, message))
                    }

                    (deals_table(&vm.deals))

                    div class="actions" {
                        form method="post" action="/send" {
                            button type="submit" class="primary" { "Send Now" }
                        }
                        a href="/deals.xlsx" { "Download .xlsx" }
                    }
                } @else {
                    (notice(NoticeKind::Error, "No data received."))
                }
            }
        },
    )
}

pub fn deals_table(deals: &[Deal]) -> Markup {
    html! {
        table id="deals" {
            thead {
                tr {
                    th scope="col" { "address" }
                    th scope="col" { "price" }
                    th scope="col" { "zestimate" }
                    th scope="col" { "discount_pct" }
                    th scope="col" { "daysOnZillow" }
                    th scope="col" { "detailUrl" }
                }
            }
            tbody {
                @for deal in deals {
                    tr {
                        td { (deal.address) }
                        td class="num" { (money(deal.price)) }
                        td class="num" { (money(deal.zestimate)) }
                        td class="num" { (percent(deal.discount_pct)) }
                        td class="num" {
                            @if let Some(days) = deal.days_on_zillow {
                                (days)
                            }
                        }
                        td {
                            a href=(deal.detail_url) target="_blank" rel="noopener" { (deal.detail_url) }
                        }
                    }
                }
            }
        }
    }
}
