use super::{Certification, DBPool, Education, Skill, Volunteering, WorkExperience};

/// Trait 用于查询简历数据
///
/// 每类数据都是一条无连接的 SELECT，排序规则固定：
/// 在职/在读条目排最前，结束日期缺失按当天处理。
pub trait ResumeQuery {
    /// 获取 [`DBPool`] 对象
    fn db(&self) -> &DBPool;

    /// 查询工作经历
    fn work_experience(&self) -> impl Future<Output = Result<Vec<WorkExperience>, sqlx::Error>> + '_ {
        async move {
            sqlx::query_as::<_, WorkExperience>(
                r#"
                SELECT id, company, position, location, start_date, end_date,
                       is_current, description, technologies
                FROM work_experience
                ORDER BY
                    CASE WHEN is_current THEN 0 ELSE 1 END,
                    COALESCE(end_date, CURRENT_DATE) DESC,
                    start_date DESC
                "#,
            )
            .fetch_all(self.db())
            .await
        }
    }

    /// 查询教育经历
    fn education(&self) -> impl Future<Output = Result<Vec<Education>, sqlx::Error>> + '_ {
        async move {
            sqlx::query_as::<_, Education>(
                r#"
                SELECT id, institution, degree, field_of_study, start_date, end_date,
                       is_current, description
                FROM education
                ORDER BY
                    CASE WHEN is_current THEN 0 ELSE 1 END,
                    COALESCE(end_date, CURRENT_DATE) DESC,
                    start_date DESC
                "#,
            )
            .fetch_all(self.db())
            .await
        }
    }

    /// 查询技能，置顶和熟练度优先
    fn skills(&self) -> impl Future<Output = Result<Vec<Skill>, sqlx::Error>> + '_ {
        async move {
            sqlx::query_as::<_, Skill>(
                r#"
                SELECT id, name, category, proficiency_level, years_experience, is_featured
                FROM skills
                ORDER BY is_featured DESC, proficiency_level DESC, years_experience DESC
                "#,
            )
            .fetch_all(self.db())
            .await
        }
    }

    /// 查询仍然有效的证书
    fn certifications(&self) -> impl Future<Output = Result<Vec<Certification>, sqlx::Error>> + '_ {
        async move {
            sqlx::query_as::<_, Certification>(
                r#"
                SELECT id, name, issuer, issue_date, expiry_date,
                       credential_id, credential_url, is_active
                FROM certifications
                WHERE is_active = true
                ORDER BY issue_date DESC
                "#,
            )
            .fetch_all(self.db())
            .await
        }
    }

    /// 查询志愿活动
    fn volunteering(&self) -> impl Future<Output = Result<Vec<Volunteering>, sqlx::Error>> + '_ {
        async move {
            sqlx::query_as::<_, Volunteering>(
                r#"
                SELECT id, organization, role, start_date, end_date, is_current, description
                FROM volunteering
                ORDER BY start_date DESC
                "#,
            )
            .fetch_all(self.db())
            .await
        }
    }
}

impl ResumeQuery for DBPool {
    fn db(&self) -> &DBPool {
        self
    }
}
