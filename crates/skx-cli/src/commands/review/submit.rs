use skx_core::entities::{Session, SkillEvaluation};

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_skill_evaluation;
use crate::context::AppContext;
use crate::output::output;

pub struct SubmitArgs<'a> {
    pub session: &'a str,
    pub teacher: &'a str,
    pub learner: &'a str,
    pub duration: u32,
    pub reviewer: &'a str,
    pub rating: u8,
    pub feedback: Option<&'a str>,
    pub covers: &'a [String],
    pub skills: &'a [String],
}

pub async fn run(args: &SubmitArgs<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let evaluations = args
        .skills
        .iter()
        .map(|raw| parse_skill_evaluation(raw))
        .collect::<anyhow::Result<Vec<SkillEvaluation>>>()?;

    let session = Session {
        id: args.session.to_string(),
        teacher_id: args.teacher.to_string(),
        learner_id: args.learner.to_string(),
        duration_minutes: args.duration,
        skill_ids: args.covers.iter().map(|s| s.trim().to_string()).collect(),
    };

    let submission = ctx
        .engine
        .submit_review(&session, args.reviewer, args.rating, args.feedback, &evaluations)
        .await?;
    output(&submission, flags.format)
}
