//! Page links for numbered pagination controls.

/// One entry of a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(u32),
    Ellipsis,
}

/// Page links around `page`.
///
/// Up to seven pages are all listed. Longer ranges show the first and last
/// page, the neighbours of `page`, and an ellipsis for each gap.
pub fn page_window(page: u32, total_pages: u32) -> Vec<PageLink> {
    let total = total_pages.max(1);
    let page = page.clamp(1, total);

    if total <= 7 {
        return (1..=total).map(PageLink::Page).collect();
    }

    let mut links = vec![PageLink::Page(1)];
    if page > 3 {
        links.push(PageLink::Ellipsis);
    }

    let start = page.saturating_sub(1).max(2);
    let end = (page + 1).min(total - 1);
    links.extend((start..=end).map(PageLink::Page));

    if page + 2 < total {
        links.push(PageLink::Ellipsis);
    }
    links.push(PageLink::Page(total));
    links
}
