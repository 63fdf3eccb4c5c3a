use std::cmp::Ordering;

use serde::{Deserialize, Serialize, Serializer};

use crate::records::Article;

/// 排序键
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "date-desc")]
    DateDesc,
    #[serde(rename = "date-asc")]
    DateAsc,
    #[serde(rename = "read-time-asc")]
    ReadTimeAsc,
    #[serde(rename = "read-time-desc")]
    ReadTimeDesc,
}

/// 列表筛选状态
///
/// 由调用方持有，引擎本身不保存任何状态。
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// 检索词，对标题和摘要做不区分大小写的子串匹配
    pub search: String,
    /// 选中的标签名，OR 语义：命中任意一个即通过
    pub tags: Vec<String>,
    /// 选中的系列，按名称或 slug 精确匹配，最多一个
    pub series: Option<String>,
    pub sort: SortKey,
    /// 1 起始页码，越界时被钳制
    pub page: usize,
}

/// 分页元信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total_count: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub page: usize,
    pub start_index: usize,
    pub end_index: usize,
}

/// 分页控件中的一项：页码或省略号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

impl Serialize for PageItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageItem::Page(n) => serializer.serialize_u64(*n as u64),
            PageItem::Ellipsis => serializer.serialize_str("…"),
        }
    }
}

/// 过滤、排序、分页引擎
///
/// 纯同步计算，不做 I/O，不持有共享状态，任意数量的并发请求可
/// 安全复用同一个实例。相同输入的两次调用结果完全一致。
#[derive(Debug, Clone, Copy)]
pub struct Engine {
    page_size: usize,
}

impl Engine {
    /// 创建引擎，`page_size` 至少为 1
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// 对记录集应用筛选状态，返回可见切片和分页元信息
    ///
    /// 所有激活的谓词按 AND 组合；没有激活谓词时全量通过。
    /// 空输入和越界页码不报错：页码钳制到合法区间，必要时返回
    /// 空切片和正确的元信息。
    pub fn apply(&self, records: &[Article], state: &FilterState) -> (Vec<Article>, PaginationMeta) {
        let mut filtered: Vec<&Article> = records.iter().filter(|a| matches(a, state)).collect();

        // 稳定排序，相等键按 id 升序决出全序，保证输出可复现
        filtered.sort_by(|a, b| compare(a, b, state.sort).then_with(|| a.id.cmp(&b.id)));

        let total_count = filtered.len();
        let total_pages = total_count.div_ceil(self.page_size);
        let page = state.page.clamp(1, total_pages.max(1));

        let start_index = ((page - 1) * self.page_size).min(total_count);
        let end_index = (start_index + self.page_size).min(total_count);

        let visible = filtered[start_index..end_index]
            .iter()
            .map(|a| (*a).clone())
            .collect();

        (
            visible,
            PaginationMeta {
                total_count,
                page_size: self.page_size,
                total_pages,
                page,
                start_index,
                end_index,
            },
        )
    }
}

fn matches(article: &Article, state: &FilterState) -> bool {
    let matches_search = state.search.is_empty() || {
        let term = state.search.to_lowercase();
        article.title.to_lowercase().contains(&term)
            || article
                .brief
                .as_ref()
                .is_some_and(|b| b.to_lowercase().contains(&term))
    };

    let matches_tags = state.tags.is_empty()
        || article
            .tags
            .iter()
            .any(|tag| state.tags.iter().any(|selected| *selected == tag.name));

    let matches_series = match &state.series {
        None => true,
        Some(selected) => article
            .series
            .as_ref()
            .is_some_and(|s| s.name == *selected || s.slug == *selected),
    };

    matches_search && matches_tags && matches_series
}

fn compare(a: &Article, b: &Article, sort: SortKey) -> Ordering {
    let read_time = |article: &Article| article.read_time_minutes.unwrap_or(0);

    match sort {
        SortKey::DateDesc => b
            .published_at
            .timestamp_millis()
            .cmp(&a.published_at.timestamp_millis()),
        SortKey::DateAsc => a
            .published_at
            .timestamp_millis()
            .cmp(&b.published_at.timestamp_millis()),
        SortKey::ReadTimeAsc => read_time(a).cmp(&read_time(b)),
        SortKey::ReadTimeDesc => read_time(b).cmp(&read_time(a)),
    }
}

/// 计算分页控件要展示的页码窗口
///
/// 展示集合为 {1, totalPages, currentPage±1, currentPage} 与
/// [1, totalPages] 的交集，相邻展示页之间间隔超过 1 时插入一个
/// 省略号。
pub fn page_window(current: usize, total: usize) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);

    let shown = (1..=total).filter(|&p| p == 1 || p == total || p.abs_diff(current) <= 1);

    let mut window = Vec::new();
    let mut prev = 0;
    for page in shown {
        if prev != 0 && page - prev > 1 {
            window.push(PageItem::Ellipsis);
        }
        window.push(PageItem::Page(page));
        prev = page;
    }
    window
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{SeriesRef, Tag};
    use chrono::TimeZone;

    fn article(id: &str, published_day: u32) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Post {id}"),
            brief: None,
            slug: format!("post-{id}"),
            url: format!("https://example.com/post-{id}"),
            published_at: chrono::Utc
                .with_ymd_and_hms(2024, 6, published_day, 12, 0, 0)
                .unwrap(),
            read_time_minutes: None,
            cover_image_url: None,
            series: None,
            tags: Vec::new(),
        }
    }

    fn tagged(id: &str, day: u32, tags: &[&str]) -> Article {
        Article {
            tags: tags
                .iter()
                .map(|t| Tag {
                    name: t.to_string(),
                    slug: t.to_string(),
                })
                .collect(),
            ..article(id, day)
        }
    }

    #[test]
    fn test_apply_is_deterministic() {
        let engine = Engine::new(10);
        let records: Vec<_> = (1..=5).map(|i| article(&i.to_string(), i as u32)).collect();
        let state = FilterState {
            sort: SortKey::DateDesc,
            page: 1,
            ..Default::default()
        };

        let first = engine.apply(&records, &state);
        let second = engine.apply(&records, &state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_apply_is_idempotent_on_visible_set() {
        let engine = Engine::new(10);
        let records: Vec<_> = (1..=5).map(|i| article(&i.to_string(), i as u32)).collect();
        let state = FilterState {
            search: "post".to_string(),
            ..Default::default()
        };

        let (visible, _) = engine.apply(&records, &state);
        let (again, _) = engine.apply(&visible, &state);
        assert_eq!(visible, again);
    }

    #[test]
    fn test_search_matches_title_and_brief() {
        let engine = Engine::new(10);
        let records = vec![
            Article {
                title: "Intro to Terraform".to_string(),
                ..article("1", 1)
            },
            Article {
                brief: Some("All about Terraform state".to_string()),
                ..article("2", 2)
            },
            article("3", 3),
        ];

        let state = FilterState {
            search: "TERRAFORM".to_string(),
            ..Default::default()
        };
        let (visible, meta) = engine.apply(&records, &state);

        assert_eq!(meta.total_count, 2);
        assert!(visible.iter().all(|a| a.id != "3"));
    }

    #[test]
    fn test_article_without_brief_matches_on_title_only() {
        let engine = Engine::new(10);
        let records = vec![article("1", 1)];

        let state = FilterState {
            search: "post 1".to_string(),
            ..Default::default()
        };
        assert_eq!(engine.apply(&records, &state).0.len(), 1);

        let state = FilterState {
            search: "missing".to_string(),
            ..Default::default()
        };
        assert!(engine.apply(&records, &state).0.is_empty());
    }

    #[test]
    fn test_tag_filter_uses_or_semantics() {
        let engine = Engine::new(10);
        let records = vec![
            tagged("1", 1, &["aws", "docker"]),
            tagged("2", 2, &["gcp"]),
        ];

        let state = FilterState {
            tags: vec!["docker".to_string()],
            ..Default::default()
        };
        let (visible, _) = engine.apply(&records, &state);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "1");

        // 多个选中标签：任意一个命中即通过
        let state = FilterState {
            tags: vec!["docker".to_string(), "gcp".to_string()],
            ..Default::default()
        };
        assert_eq!(engine.apply(&records, &state).0.len(), 2);
    }

    #[test]
    fn test_series_filter_matches_name_or_slug() {
        let engine = Engine::new(10);
        let in_series = Article {
            series: Some(SeriesRef {
                id: "s1".to_string(),
                name: "AWS Basics".to_string(),
                slug: "aws-basics".to_string(),
            }),
            ..article("1", 1)
        };
        let records = vec![in_series, article("2", 2)];

        for selected in ["AWS Basics", "aws-basics"] {
            let state = FilterState {
                series: Some(selected.to_string()),
                ..Default::default()
            };
            let (visible, _) = engine.apply(&records, &state);
            assert_eq!(visible.len(), 1);
            assert_eq!(visible[0].id, "1");
        }
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let engine = Engine::new(10);
        let records = vec![
            tagged("1", 1, &["aws"]),
            Article {
                title: "Special".to_string(),
                ..tagged("2", 2, &["aws"])
            },
        ];

        let state = FilterState {
            search: "special".to_string(),
            tags: vec!["aws".to_string()],
            ..Default::default()
        };
        let (visible, _) = engine.apply(&records, &state);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "2");
    }

    #[test]
    fn test_sort_date_desc_is_monotonic() {
        let engine = Engine::new(30);
        let records: Vec<_> = [5, 2, 9, 1, 7]
            .iter()
            .enumerate()
            .map(|(i, &day)| article(&i.to_string(), day))
            .collect();

        let (visible, _) = engine.apply(
            &records,
            &FilterState {
                sort: SortKey::DateDesc,
                ..Default::default()
            },
        );

        for pair in visible.windows(2) {
            assert!(pair[0].published_at >= pair[1].published_at);
        }
    }

    #[test]
    fn test_sort_ties_break_by_id_ascending() {
        let engine = Engine::new(10);
        // 同一天发布，顺序必须由 id 决定
        let records = vec![article("b", 1), article("a", 1), article("c", 1)];

        let (visible, _) = engine.apply(&records, &FilterState::default());
        let ids: Vec<_> = visible.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_sort_read_time_treats_missing_as_zero() {
        let engine = Engine::new(10);
        let records = vec![
            Article {
                read_time_minutes: Some(8),
                ..article("1", 1)
            },
            article("2", 2),
            Article {
                read_time_minutes: Some(3),
                ..article("3", 3)
            },
        ];

        let (visible, _) = engine.apply(
            &records,
            &FilterState {
                sort: SortKey::ReadTimeAsc,
                ..Default::default()
            },
        );
        let ids: Vec<_> = visible.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["2", "3", "1"]);
    }

    #[test]
    fn test_pagination_metadata() {
        let engine = Engine::new(10);
        let records: Vec<_> = (1..=25).map(|i| article(&format!("{i:02}"), 1)).collect();

        let (visible, meta) = engine.apply(
            &records,
            &FilterState {
                page: 3,
                ..Default::default()
            },
        );

        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.start_index, 20);
        assert_eq!(visible.len(), 5);
    }

    #[test]
    fn test_pages_reconstruct_full_set_without_duplicates() {
        let engine = Engine::new(10);
        let records: Vec<_> = (1..=25).map(|i| article(&format!("{i:02}"), 1)).collect();

        let mut seen = Vec::new();
        let total_pages = engine.apply(&records, &FilterState::default()).1.total_pages;
        for page in 1..=total_pages {
            let (visible, _) = engine.apply(
                &records,
                &FilterState {
                    page,
                    ..Default::default()
                },
            );
            assert!(visible.len() <= engine.page_size());
            seen.extend(visible.into_iter().map(|a| a.id));
        }

        let mut unique = seen.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(seen.len(), 25);
        assert_eq!(unique.len(), 25);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let engine = Engine::new(10);
        let records: Vec<_> = (1..=5).map(|i| article(&i.to_string(), 1)).collect();

        let (visible, meta) = engine.apply(
            &records,
            &FilterState {
                page: 99,
                ..Default::default()
            },
        );
        assert_eq!(meta.page, 1);
        assert_eq!(visible.len(), 5);

        let (_, meta) = engine.apply(
            &records,
            &FilterState {
                page: 0,
                ..Default::default()
            },
        );
        assert_eq!(meta.page, 1);
    }

    #[test]
    fn test_empty_input_yields_empty_slice_with_metadata() {
        let engine = Engine::new(10);
        let (visible, meta) = engine.apply(&[], &FilterState::default());

        assert!(visible.is_empty());
        assert_eq!(meta.total_count, 0);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.start_index, 0);
        assert_eq!(meta.end_index, 0);
    }

    #[test]
    fn test_page_window_with_middle_page() {
        let window = page_window(5, 10);
        assert_eq!(
            window,
            vec![
                PageItem::Page(1),
                PageItem::Ellipsis,
                PageItem::Page(4),
                PageItem::Page(5),
                PageItem::Page(6),
                PageItem::Ellipsis,
                PageItem::Page(10),
            ]
        );
    }

    #[test]
    fn test_page_window_near_edges() {
        assert_eq!(
            page_window(1, 4),
            vec![
                PageItem::Page(1),
                PageItem::Page(2),
                PageItem::Ellipsis,
                PageItem::Page(4),
            ]
        );

        assert_eq!(
            page_window(2, 3),
            vec![PageItem::Page(1), PageItem::Page(2), PageItem::Page(3)]
        );

        assert_eq!(page_window(1, 1), vec![PageItem::Page(1)]);
        assert_eq!(page_window(3, 0), Vec::<PageItem>::new());
    }

    #[test]
    fn test_page_window_serializes_with_ellipsis_marker() {
        let json = serde_json::to_string(&page_window(5, 10)).unwrap();
        assert_eq!(json, r#"[1,"…",4,5,6,"…",10]"#);
    }
}
