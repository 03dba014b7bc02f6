pub(crate) mod blog_create;
pub(crate) mod blog_detail;
pub(crate) mod blog_edit;
pub(crate) mod blogs;
pub(crate) mod home;
pub(crate) mod profile;
pub(crate) mod signin;
pub(crate) mod signup;
