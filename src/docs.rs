use quill_auth::Claims;
use quill_core::ErrorResponse;
use quill_models::{
    AuthTokenResponse, Comment, CommentWithRelations, CreateCommentDto, CreatePostDto,
    CreateUserDto, Email, LoginRequest, MessageResponse, Post, PostWithRelations,
    RegisterRequest, UpdateCommentDto, UpdatePostDto, UpdateUserDto, User, VerifyTokenRequest,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::verify_token,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::posts::controller::create_post,
        crate::modules::posts::controller::get_posts,
        crate::modules::posts::controller::get_post,
        crate::modules::posts::controller::update_post,
        crate::modules::posts::controller::delete_post,
        crate::modules::comments::controller::create_comment,
        crate::modules::comments::controller::get_comments,
        crate::modules::comments::controller::get_comment,
        crate::modules::comments::controller::update_comment,
        crate::modules::comments::controller::delete_comment,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            VerifyTokenRequest,
            AuthTokenResponse,
            Claims,
            MessageResponse,
            ErrorResponse,
            Email,
            User,
            CreateUserDto,
            UpdateUserDto,
            Post,
            PostWithRelations,
            CreatePostDto,
            UpdatePostDto,
            Comment,
            CommentWithRelations,
            CreateCommentDto,
            UpdateCommentDto,
        )
    ),
    tags(
        (name = "Authentication", description = "Registration, login and token verification"),
        (name = "Users", description = "User management endpoints"),
        (name = "Posts", description = "Blog post endpoints"),
        (name = "Comments", description = "Comment endpoints")
    ),
    info(
        title = "Quill API",
        version = "0.1.0",
        description = "A blog backend built with Rust, Axum, and PostgreSQL with JWT-based authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
