use std::env;
use std::sync::LazyLock;

macro_rules! lazy_env_var {
    ($name:ident) => {
        pub static $name: LazyLock<String> = LazyLock::new(|| {
            let var_name = stringify!($name);
            env::var(var_name).expect(&format!("{} must be set", var_name))
        });
    };
}

lazy_env_var!(JWT_SECRET_KEY);
lazy_env_var!(COOKIE_NAME);
lazy_env_var!(MONGODB_URI);
lazy_env_var!(DB_NAME);
lazy_env_var!(USER_COL_NAME);
lazy_env_var!(BRANCH_COL_NAME);
lazy_env_var!(QUESTION_COL_NAME);
lazy_env_var!(USER_ANSWER_COL_NAME);
lazy_env_var!(USER_LEVEL_COL_NAME);
lazy_env_var!(ACHIEVEMENT_COL_NAME);
lazy_env_var!(USER_ACHIEVEMENT_COL_NAME);
lazy_env_var!(PLAN_COL_NAME);
lazy_env_var!(SUBSCRIPTION_COL_NAME);
lazy_env_var!(CHAT_COL_NAME);
lazy_env_var!(STRIPE_SECRET_KEY);
lazy_env_var!(STRIPE_WEBHOOK_SECRET);
lazy_env_var!(PAYPAL_CLIENT_ID);
lazy_env_var!(PAYPAL_CLIENT_SECRET);
lazy_env_var!(PAYPAL_API_BASE);
lazy_env_var!(PAYPAL_WEBHOOK_ID);
lazy_env_var!(OPENAI_API_KEY);
lazy_env_var!(CHECKOUT_SUCCESS_URL);
lazy_env_var!(CHECKOUT_CANCEL_URL);

/// Correct answers required before a level counts as completed.
pub const QUESTIONS_PER_LEVEL: u32 = 10;

/// Levels per branch unless the branch overrides it.
pub const DEFAULT_LEVEL_COUNT: u32 = 10;

/// How many trailing chat messages are sent as model context.
pub const CHAT_HISTORY_WINDOW: usize = 20;

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const OPENAI_MODEL: &str = "gpt-4o-mini";
pub const STRIPE_API_BASE: &str = "https://api.stripe.com";
