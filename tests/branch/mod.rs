mod create_branch_at_current_tip;
mod rejected_branch_names;
