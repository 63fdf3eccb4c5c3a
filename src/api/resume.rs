use axum::{Json, extract::State};

use crate::{
    error::Result,
    storage::{
        Certification, DBPool, Education, ResumeQuery, Skill, Volunteering, WorkExperience,
    },
};

/// 获取工作经历
pub async fn work_experience(State(pool): State<DBPool>) -> Result<Json<Vec<WorkExperience>>> {
    pool.work_experience().await.map(Json).map_err(Into::into)
}

/// 获取教育经历
pub async fn education(State(pool): State<DBPool>) -> Result<Json<Vec<Education>>> {
    pool.education().await.map(Json).map_err(Into::into)
}

/// 获取技能列表
pub async fn skills(State(pool): State<DBPool>) -> Result<Json<Vec<Skill>>> {
    pool.skills().await.map(Json).map_err(Into::into)
}

/// 获取有效证书
pub async fn certifications(State(pool): State<DBPool>) -> Result<Json<Vec<Certification>>> {
    pool.certifications().await.map(Json).map_err(Into::into)
}

/// 获取志愿活动
pub async fn volunteering(State(pool): State<DBPool>) -> Result<Json<Vec<Volunteering>>> {
    pool.volunteering().await.map(Json).map_err(Into::into)
}
