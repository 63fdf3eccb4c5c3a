use crate::{
    error::NormalizationError,
    records::{Article, Series, SeriesRef, Tag},
};

use super::queries::{RawPost, RawSeries};

/// 将远端文章节点归一化为 [`Article`]
///
/// `id`、`title`、`slug`、`url`、`publishedAt` 为必填，缺失时返回
/// [`NormalizationError`]。可选字段缺失映射为 `None`，标签缺失映射为
/// 空向量。系列引用要求三个字段齐全，否则按无系列处理。
pub fn normalize_post(raw: RawPost) -> Result<Article, NormalizationError> {
    let missing = |field| NormalizationError {
        kind: "post",
        field,
    };

    Ok(Article {
        id: raw.id.ok_or(missing("id"))?,
        title: raw.title.ok_or(missing("title"))?,
        brief: raw.brief.filter(|b| !b.is_empty()),
        slug: raw.slug.ok_or(missing("slug"))?,
        url: raw.url.ok_or(missing("url"))?,
        published_at: raw.published_at.ok_or(missing("publishedAt"))?,
        read_time_minutes: raw.read_time_in_minutes,
        cover_image_url: raw.cover_image.and_then(|c| c.url),
        series: raw.series.and_then(|s| {
            Some(SeriesRef {
                id: s.id?,
                name: s.name?,
                slug: s.slug?,
            })
        }),
        tags: raw
            .tags
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| {
                Some(Tag {
                    name: t.name?,
                    slug: t.slug?,
                })
            })
            .collect(),
    })
}

/// 将远端系列节点归一化为 [`Series`]
pub fn normalize_series(raw: RawSeries) -> Result<Series, NormalizationError> {
    let missing = |field| NormalizationError {
        kind: "series",
        field,
    };

    Ok(Series {
        id: raw.id.ok_or(missing("id"))?,
        name: raw.name.ok_or(missing("name"))?,
        slug: raw.slug.ok_or(missing("slug"))?,
        description: raw
            .description
            .and_then(|d| d.text)
            .filter(|t| !t.is_empty()),
        total_posts: raw.posts.map(|p| p.total_documents).unwrap_or(0),
        created_at: raw.created_at,
        updated_at: raw.updated_at,
    })
}

/// 批量归一化，坏节点记录告警后丢弃，不影响其余节点
pub fn normalize_batch<R, T>(
    nodes: impl IntoIterator<Item = R>,
    normalize: impl Fn(R) -> Result<T, NormalizationError>,
) -> Vec<T> {
    nodes
        .into_iter()
        .filter_map(|node| match normalize(node) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(%e, "dropping malformed node");
                None
            }
        })
        .collect()
}
