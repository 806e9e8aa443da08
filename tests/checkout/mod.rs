mod checkout_switches_head;
mod checkout_of_unknown_branch_fails;
