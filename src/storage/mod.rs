mod article_query;
mod article_store;
mod models;
mod postgres;
mod resume_query;

pub use self::{
    article_query::ArticleQuery,
    article_store::{ArticleStore, SqlxArticleStore},
    models::{
        ArticleRow, Certification, Education, SeriesRow, Skill, Volunteering, WorkExperience,
    },
    postgres::{DBPool, init_db_from_env, migrate},
    resume_query::ResumeQuery,
};
