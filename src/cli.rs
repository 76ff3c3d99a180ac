//! CLI command handling
//!
//! Each handler follows the same loop the platform's web client uses:
//! dispatch an operation against the backend, merge the result into the
//! in-memory state, then refetch the affected collection so the rendered
//! view reflects authoritative server state. A failed refetch only warns;
//! the stale collection stays until the next successful fetch.

use std::path::PathBuf;

use dialoguer::{Input, Password};

use orator_protocol::{
    Class, ClassStatus, Course, CreateClassRequest, CreateCourseRequest, CreateGroupRequest,
    CreatePresentationRequest, CreateTopicRequest, Group, PageQuery, Presentation, Role, Topic,
    UpdateClassRequest, UpdateCourseRequest, UpdateGroupRequest, UpdateTopicRequest, User,
};

use crate::admin::AdminService;
use crate::class::ClassService;
use crate::client::{ApiClient, HttpClient};
use crate::config::{CliConfig, ConfigService};
use crate::course::CourseService;
use crate::enrollment::EnrollmentService;
use crate::error::{OratorError, Result};
use crate::group::GroupService;
use crate::presentation::PresentationService;
use crate::state::AppState;
use crate::topic::TopicService;
use crate::ui::UI;
use crate::upload::{SlotKind, UploadFlow};
use crate::{
    AdminCommand, ClassCommand, Commands, ConfigCommand, CourseCommand, CreateClassArgs,
    CreateCourseArgs, CreateTopicArgs, DropCommand, EnrollCommand, GroupCommand, LoginArgs,
    PageArgs, PresentationCommand, TopicCommand, UpdateClassArgs, UpdateCourseArgs,
    UpdateTopicArgs,
};

fn parse_class_status(value: &str) -> Result<ClassStatus> {
    match value.to_lowercase().as_str() {
        "active" => Ok(ClassStatus::Active),
        "inactive" => Ok(ClassStatus::Inactive),
        "archived" => Ok(ClassStatus::Archived),
        other => Err(OratorError::invalid_input(format!(
            "Unknown class status '{}'. Expected active, inactive or archived",
            other
        ))),
    }
}

fn parse_role(value: &str) -> Result<Role> {
    match value.to_lowercase().as_str() {
        "student" => Ok(Role::Student),
        "instructor" => Ok(Role::Instructor),
        "admin" => Ok(Role::Admin),
        other => Err(OratorError::invalid_input(format!(
            "Unknown role '{}'. Expected student, instructor or admin",
            other
        ))),
    }
}

fn page_query(args: &PageArgs) -> PageQuery {
    PageQuery {
        page: args.page,
        limit: args.limit,
    }
}

/// CLI handler for processing commands
pub struct CliHandler {
    config_path: Option<PathBuf>,
    state: AppState,
    ui: UI,
}

impl CliHandler {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            state: AppState::new(),
            ui: UI::new(),
        }
    }

    async fn load_config(&self) -> Result<CliConfig> {
        CliConfig::load(self.config_path.as_deref()).await
    }

    async fn build_client(&self) -> Result<HttpClient> {
        let config = self.load_config().await?;
        HttpClient::new(config.to_sdk_config())
    }

    /// Execute a CLI command
    pub async fn execute(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Login(args) => self.handle_login(args).await,
            Commands::Register => self.handle_register().await,
            Commands::Logout => self.handle_logout().await,
            Commands::Status => self.handle_status().await,
            Commands::Config(args) => self.handle_config(args.command).await,
            Commands::Course(args) => self.handle_course(args.command).await,
            Commands::Class(args) => self.handle_class(args.command).await,
            Commands::Topic(args) => self.handle_topic(args.command).await,
            Commands::Group(args) => self.handle_group(args.command).await,
            Commands::Enroll(args) => self.handle_enroll(args.command).await,
            Commands::Drop(args) => self.handle_drop(args.command).await,
            Commands::Presentation(args) => self.handle_presentation(args.command).await,
            Commands::Admin(args) => self.handle_admin(args.command).await,
        }
    }

    // ==================== Session ====================

    async fn handle_login(&mut self, args: LoginArgs) -> Result<()> {
        let client = self.build_client().await?;

        let email = match args.email {
            Some(email) => email,
            None => Input::<String>::new().with_prompt("Email").interact_text()?,
        };
        let password = Password::new().with_prompt("Password").interact()?;

        let user = client.login(email, password).await?;
        self.state.user = Some(user.clone());

        self.ui
            .success(&format!("Logged in as {} <{}>", user.full_name, user.email));
        Ok(())
    }

    async fn handle_register(&mut self) -> Result<()> {
        let client = self.build_client().await?;

        let full_name = Input::<String>::new()
            .with_prompt("Full name")
            .interact_text()?;
        let email = Input::<String>::new().with_prompt("Email").interact_text()?;
        let password = Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?;

        let user = client.register(full_name, email, password).await?;
        self.state.user = Some(user.clone());

        self.ui
            .success(&format!("Account created for {}", user.email));
        Ok(())
    }

    async fn handle_logout(&mut self) -> Result<()> {
        let client = self.build_client().await?;
        client.logout().await?;
        self.state.clear_session();

        self.ui.success("Logged out");
        Ok(())
    }

    async fn handle_status(&mut self) -> Result<()> {
        let config = self.load_config().await?;
        let client = HttpClient::new(config.to_sdk_config())?;

        let authenticated = client.is_authenticated();
        self.state.user = client.current_user();

        let mut rows = vec![
            ("Version", crate::version::format_version_info()),
            ("Session", self.ui.format_auth_status(authenticated)),
        ];

        if let Some(user) = &self.state.user {
            rows.push(("Name", user.full_name.clone()));
            rows.push(("Email", user.email.clone()));
            let roles = user
                .roles
                .iter()
                .map(|r| format!("{:?}", r).to_lowercase())
                .collect::<Vec<_>>()
                .join(", ");
            rows.push(("Roles", self.ui.format_user_field(Some(roles))));
        }

        rows.push(("Endpoint", config.endpoint.clone()));

        self.ui.card("Status", rows);
        Ok(())
    }

    async fn handle_config(&mut self, command: ConfigCommand) -> Result<()> {
        let config = self.load_config().await?;
        let mut service = if let Some(path) = self.config_path.clone() {
            ConfigService::with_config_path(config, path)
        } else {
            ConfigService::new(config)
        };

        match command {
            ConfigCommand::Show => {
                let current = service.current();
                self.ui.card(
                    "Configuration",
                    vec![
                        ("Endpoint", current.endpoint.clone()),
                        ("Timeout", format!("{}s", current.timeout)),
                        ("Verbose", current.verbose.to_string()),
                        (
                            "Session storage",
                            current.session_storage_enabled.to_string(),
                        ),
                    ],
                );
            }
            #[cfg(debug_assertions)]
            ConfigCommand::SetEndpoint { url } => {
                service.set_endpoint(url).await?;
                self.ui.success("Endpoint updated");
            }
            ConfigCommand::SetTimeout { seconds } => {
                service.set_timeout(seconds).await?;
                self.ui.success("Timeout updated");
            }
            ConfigCommand::SetVerbose { enabled } => {
                let enabled = matches!(enabled.to_lowercase().as_str(), "true" | "on" | "1");
                service.set_verbose(enabled).await?;
                self.ui.success("Verbose setting updated");
            }
            ConfigCommand::Reset => {
                service.reset().await?;
                self.ui.success("Configuration reset to defaults");
            }
        }
        Ok(())
    }

    // ==================== Courses ====================

    async fn refresh_courses(&mut self, client: &HttpClient) -> Result<()> {
        let page = CourseService::new(client).list(PageQuery::default()).await?;
        self.state.courses.set_page(page);
        Ok(())
    }

    fn render_courses(&self) {
        if self.state.courses.is_empty() {
            self.ui.info("No courses found");
            return;
        }
        for course in &self.state.courses.items {
            println!(
                "{:>6}  {:<10} {:<40} {} -> {}",
                course.id, course.code, course.title, course.start_date, course.end_date
            );
        }
        if let Some(p) = &self.state.courses.pagination {
            self.ui.info(&format!(
                "Page {}/{} ({} total)",
                p.page, p.total_pages, p.total
            ));
        }
    }

    async fn handle_course(&mut self, command: CourseCommand) -> Result<()> {
        let client = self.build_client().await?;
        let service = CourseService::new(&client);

        match command {
            CourseCommand::List(args) => {
                let page = service.list(page_query(&args)).await?;
                self.state.courses.set_page(page);
                self.render_courses();
            }
            CourseCommand::Show { id } => {
                let course = service.get(id).await?;
                self.render_course_card(&course);
            }
            CourseCommand::Create(args) => {
                let course = service.create(Self::create_course_request(args)).await?;
                self.state.courses.insert_front(course.clone());
                self.ui
                    .success(&format!("Created course {} (id {})", course.code, course.id));
                self.refetch_courses_or_warn(&client).await;
            }
            CourseCommand::Update(args) => {
                let id = args.id;
                let course = service.update(id, Self::update_course_request(args)).await?;
                self.state.courses.replace(course.clone());
                self.ui.success(&format!("Updated course {}", course.id));
                self.refetch_courses_or_warn(&client).await;
            }
            CourseCommand::Delete { id } => {
                service.delete(id).await?;
                self.state.courses.remove(id);
                self.ui.success(&format!("Deleted course {}", id));
                self.refetch_courses_or_warn(&client).await;
            }
        }
        Ok(())
    }

    async fn refetch_courses_or_warn(&mut self, client: &HttpClient) {
        if let Err(e) = self.refresh_courses(client).await {
            self.ui
                .warning(&format!("Could not refresh course list: {}", e));
        }
    }

    fn create_course_request(args: CreateCourseArgs) -> CreateCourseRequest {
        CreateCourseRequest {
            code: args.code,
            title: args.title,
            description: args.description,
            semester: args.semester,
            academic_year: args.academic_year,
            start_date: args.start_date,
            end_date: args.end_date,
        }
    }

    fn update_course_request(args: UpdateCourseArgs) -> UpdateCourseRequest {
        UpdateCourseRequest {
            code: args.code,
            title: args.title,
            description: args.description,
            semester: args.semester,
            academic_year: args.academic_year,
            start_date: args.start_date,
            end_date: args.end_date,
        }
    }

    fn render_course_card(&self, course: &Course) {
        let instructors = course
            .instructors
            .iter()
            .map(|i| i.full_name.clone())
            .collect::<Vec<_>>()
            .join(", ");
        self.ui.card(
            &format!("Course {}", course.code),
            vec![
                ("Id", course.id.to_string()),
                ("Title", course.title.clone()),
                ("Semester", course.semester.clone()),
                ("Year", course.academic_year.clone()),
                (
                    "Window",
                    format!("{} -> {}", course.start_date, course.end_date),
                ),
                ("Instructors", self.ui.format_user_field(Some(instructors))),
            ],
        );
    }

    // ==================== Classes ====================

    async fn handle_class(&mut self, command: ClassCommand) -> Result<()> {
        let client = self.build_client().await?;
        let service = ClassService::new(&client);

        match command {
            ClassCommand::List(args) => {
                let page = service.list(page_query(&args)).await?;
                self.state.classes.set_page(page);
                for class in &self.state.classes.items {
                    println!(
                        "{:>6}  {:<30} course {:>4}  cap {:>3}  {:?}",
                        class.id, class.name, class.course_id, class.max_students, class.status
                    );
                }
                if let Some(p) = &self.state.classes.pagination {
                    self.ui.info(&format!(
                        "Page {}/{} ({} total)",
                        p.page, p.total_pages, p.total
                    ));
                }
            }
            ClassCommand::Show { id } => {
                let class = service.get(id).await?;
                self.render_class_card(&class);
            }
            ClassCommand::Create(args) => {
                let class = service.create(Self::create_class_request(args)).await?;
                self.state.classes.insert_front(class.clone());
                self.ui
                    .success(&format!("Created class '{}' (id {})", class.name, class.id));
                self.refetch_classes_or_warn(&client).await;
            }
            ClassCommand::Update(args) => {
                let id = args.id;
                let class = service.update(id, Self::update_class_request(args)?).await?;
                self.state.classes.replace(class.clone());
                self.ui.success(&format!("Updated class {}", class.id));
                self.refetch_classes_or_warn(&client).await;
            }
            ClassCommand::Delete { id } => {
                service.delete(id).await?;
                self.state.classes.remove(id);
                self.ui.success(&format!("Deleted class {}", id));
                self.refetch_classes_or_warn(&client).await;
            }
            ClassCommand::AssignInstructor { class_id, user_id } => {
                let class = service.assign_instructor(class_id, user_id).await?;
                self.state.classes.replace(class);
                self.ui.success(&format!(
                    "Assigned user {} as instructor of class {}",
                    user_id, class_id
                ));
            }
            ClassCommand::RemoveInstructor { class_id, user_id } => {
                let class = service.remove_instructor(class_id, user_id).await?;
                self.state.classes.replace(class);
                self.ui.success(&format!(
                    "Removed instructor {} from class {}",
                    user_id, class_id
                ));
            }
        }
        Ok(())
    }

    async fn refetch_classes_or_warn(&mut self, client: &HttpClient) {
        let result = ClassService::new(client).list(PageQuery::default()).await;
        match result {
            Ok(page) => self.state.classes.set_page(page),
            Err(e) => self
                .ui
                .warning(&format!("Could not refresh class list: {}", e)),
        }
    }

    fn create_class_request(args: CreateClassArgs) -> CreateClassRequest {
        CreateClassRequest {
            course_id: args.course,
            name: args.name,
            max_students: args.max_students,
            enroll_key: args.enroll_key,
            max_group_members: args.max_group_members,
        }
    }

    fn update_class_request(args: UpdateClassArgs) -> Result<UpdateClassRequest> {
        Ok(UpdateClassRequest {
            name: args.name,
            max_students: args.max_students,
            enroll_key: args.enroll_key,
            max_group_members: args.max_group_members,
            status: parse_class_status(&args.status)?,
        })
    }

    fn render_class_card(&self, class: &Class) {
        let instructors = class
            .instructors
            .iter()
            .map(|i| i.full_name.clone())
            .collect::<Vec<_>>()
            .join(", ");
        let mut rows = vec![
            ("Id", class.id.to_string()),
            ("Course", class.course_id.to_string()),
            ("Capacity", class.max_students.to_string()),
            ("Status", format!("{:?}", class.status)),
            ("Instructors", self.ui.format_user_field(Some(instructors))),
        ];
        if let Some(max) = class.max_group_members {
            rows.push(("Group size limit", max.to_string()));
        }
        if let Some(key) = &class.enroll_key {
            rows.push(("Enroll key", key.clone()));
        }
        self.ui.card(&format!("Class '{}'", class.name), rows);
    }

    // ==================== Topics ====================

    async fn handle_topic(&mut self, command: TopicCommand) -> Result<()> {
        let client = self.build_client().await?;
        let service = TopicService::new(&client);

        match command {
            TopicCommand::List { course, page } => {
                let result = service.list_for_course(course, page_query(&page)).await?;
                self.state.topics.set_page(result);
                for topic in &self.state.topics.items {
                    println!(
                        "{:>6}  #{:<3} {:<40} due {}  {} min",
                        topic.id,
                        topic.sequence_no,
                        topic.title,
                        topic.due_date,
                        topic.max_duration_minutes
                    );
                }
            }
            TopicCommand::Show { id } => {
                let topic = service.get(id).await?;
                self.render_topic_card(&topic);
            }
            TopicCommand::Create(args) => {
                let course_id = args.course;
                let topic = service
                    .create(course_id, Self::create_topic_request(args))
                    .await?;
                self.state.topics.insert_front(topic.clone());
                self.ui
                    .success(&format!("Created topic '{}' (id {})", topic.title, topic.id));
                self.refetch_topics_or_warn(&client, course_id).await;
            }
            TopicCommand::Update(args) => {
                let id = args.id;
                let topic = service.update(id, Self::update_topic_request(args)).await?;
                self.state.topics.replace(topic.clone());
                self.ui.success(&format!("Updated topic {}", topic.id));
                self.refetch_topics_or_warn(&client, topic.course_id).await;
            }
            TopicCommand::Delete { id } => {
                service.delete(id).await?;
                self.state.topics.remove(id);
                self.ui.success(&format!("Deleted topic {}", id));
            }
        }
        Ok(())
    }

    async fn refetch_topics_or_warn(&mut self, client: &HttpClient, course_id: i64) {
        let result = TopicService::new(client)
            .list_for_course(course_id, PageQuery::default())
            .await;
        match result {
            Ok(page) => self.state.topics.set_page(page),
            Err(e) => self
                .ui
                .warning(&format!("Could not refresh topic list: {}", e)),
        }
    }

    fn create_topic_request(args: CreateTopicArgs) -> CreateTopicRequest {
        CreateTopicRequest {
            title: args.title,
            description: args.description,
            due_date: args.due_date,
            max_duration_minutes: args.max_duration,
            sequence_no: args.sequence,
        }
    }

    fn update_topic_request(args: UpdateTopicArgs) -> UpdateTopicRequest {
        UpdateTopicRequest {
            title: args.title,
            description: args.description,
            due_date: args.due_date,
            max_duration_minutes: args.max_duration,
            sequence_no: args.sequence,
        }
    }

    fn render_topic_card(&self, topic: &Topic) {
        self.ui.card(
            &format!("Topic '{}'", topic.title),
            vec![
                ("Id", topic.id.to_string()),
                ("Course", topic.course_id.to_string()),
                ("Sequence", topic.sequence_no.to_string()),
                ("Due", topic.due_date.to_string()),
                (
                    "Max duration",
                    format!("{} min", topic.max_duration_minutes),
                ),
            ],
        );
    }

    // ==================== Groups ====================

    async fn handle_group(&mut self, command: GroupCommand) -> Result<()> {
        let client = self.build_client().await?;
        let service = GroupService::new(&client);

        match command {
            GroupCommand::List { class } => {
                let groups = service.list_for_class(class).await?;
                for group in &groups {
                    println!(
                        "{:>6}  {:<30} leader {:<20} members {}{}",
                        group.id,
                        group.name,
                        group.leader.full_name,
                        group.member_count,
                        group
                            .max_members
                            .map(|m| format!("/{}", m))
                            .unwrap_or_default()
                    );
                }
                self.state.groups.set_page(crate::client::Page {
                    items: groups,
                    pagination: None,
                });
            }
            GroupCommand::My { class } => match service.my_group(class).await? {
                Some(group) => self.render_group_card(&group),
                None => self.ui.info("You are not in a group for this class"),
            },
            GroupCommand::Create { class, name } => {
                let group = service
                    .create(CreateGroupRequest {
                        class_id: class,
                        name,
                    })
                    .await?;
                self.state.groups.insert_front(group.clone());
                self.ui.success(&format!(
                    "Created group '{}' (id {}); you are the leader",
                    group.name, group.id
                ));
                self.refetch_groups_or_warn(&client, class).await;
            }
            GroupCommand::Rename { id, name } => {
                let group = service.update(id, UpdateGroupRequest { name }).await?;
                self.state.groups.replace(group.clone());
                self.ui
                    .success(&format!("Renamed group {} to '{}'", group.id, group.name));
            }
            GroupCommand::Join { class, group_id } => {
                let roster = service.list_for_class(class).await?;
                let target = roster
                    .iter()
                    .find(|g| g.id == group_id)
                    .ok_or_else(|| {
                        OratorError::not_found(format!("group {} in class {}", group_id, class))
                    })?;

                let group = service.join(target).await?;
                self.ui
                    .success(&format!("Joined group '{}' as a member", group.name));
                self.refetch_groups_or_warn(&client, class).await;
            }
            GroupCommand::Leave { id } => {
                service.leave(id).await?;
                self.state.groups.remove(id);
                self.ui.success("Left the group");
            }
            GroupCommand::RemoveMember { group_id, user_id } => {
                let group = service.remove_member(group_id, user_id).await?;
                self.state.groups.replace(group);
                self.ui
                    .success(&format!("Removed user {} from group {}", user_id, group_id));
            }
            GroupCommand::ChangeLeader { group_id, user_id } => {
                let group = service.change_leader(group_id, user_id).await?;
                self.state.groups.replace(group.clone());
                self.ui.success(&format!(
                    "Leadership of '{}' transferred to {}",
                    group.name, group.leader.full_name
                ));
            }
        }
        Ok(())
    }

    async fn refetch_groups_or_warn(&mut self, client: &HttpClient, class_id: i64) {
        match GroupService::new(client).list_for_class(class_id).await {
            Ok(groups) => self.state.groups.set_page(crate::client::Page {
                items: groups,
                pagination: None,
            }),
            Err(e) => self
                .ui
                .warning(&format!("Could not refresh group roster: {}", e)),
        }
    }

    fn render_group_card(&self, group: &Group) {
        let members = group
            .members
            .iter()
            .map(|m| {
                format!(
                    "{}{}",
                    m.user.full_name,
                    match m.role {
                        orator_protocol::GroupRole::Leader => " (leader)",
                        orator_protocol::GroupRole::Member => "",
                    }
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut rows = vec![
            ("Id", group.id.to_string()),
            ("Class", group.class_id.to_string()),
            ("Leader", group.leader.full_name.clone()),
            (
                "Members",
                format!(
                    "{}{}",
                    group.member_count,
                    group
                        .max_members
                        .map(|m| format!("/{}", m))
                        .unwrap_or_default()
                ),
            ),
            ("Roster", self.ui.format_user_field(Some(members))),
        ];
        if let Some(role) = group.my_role {
            rows.push(("Your role", format!("{:?}", role).to_lowercase()));
        }
        self.ui.card(&format!("Group '{}'", group.name), rows);
    }

    // ==================== Enrollment ====================

    async fn handle_enroll(&mut self, command: EnrollCommand) -> Result<()> {
        let client = self.build_client().await?;
        let service = EnrollmentService::new(&client);

        match command {
            EnrollCommand::Course { id } => {
                service.enroll_course(id).await?;
                self.state.enrollments.add_course(id);
                self.ui.success(&format!("Enrolled in course {}", id));
                self.refetch_enrollments_or_warn(&client).await;
                if !self.state.enrollments.has_course(id) {
                    self.ui
                        .warning("Enrollment not yet visible server-side; refetch later");
                }
            }
            EnrollCommand::Topic { id } => {
                service.enroll_topic(id).await?;
                self.state.enrollments.add_topic(id);
                self.ui.success(&format!("Enrolled in topic {}", id));
                self.refetch_enrollments_or_warn(&client).await;
                if !self.state.enrollments.has_topic(id) {
                    self.ui
                        .warning("Enrollment not yet visible server-side; refetch later");
                }
            }
            EnrollCommand::Class { id, key } => {
                let key = match key {
                    Some(key) => key,
                    None => Input::<String>::new()
                        .with_prompt("Enroll key")
                        .interact_text()?,
                };
                service.enroll_class_by_key(id, &key).await?;
                self.state.enrollments.add_class(id);
                self.ui.success(&format!("Enrolled in class {}", id));
                self.refetch_enrollments_or_warn(&client).await;
                if !self.state.enrollments.has_class(id) {
                    self.ui
                        .warning("Enrollment not yet visible server-side; refetch later");
                }
            }
            EnrollCommand::Show => {
                self.refetch_enrollments_or_warn(&client).await;
                let e = &self.state.enrollments;
                self.ui.card(
                    "Enrollments",
                    vec![
                        ("Courses", format!("{:?}", e.course_ids)),
                        ("Topics", format!("{:?}", e.topic_ids)),
                        ("Classes", format!("{:?}", e.class_ids)),
                    ],
                );
            }
        }
        Ok(())
    }

    async fn handle_drop(&mut self, command: DropCommand) -> Result<()> {
        let client = self.build_client().await?;
        let service = EnrollmentService::new(&client);

        match command {
            DropCommand::Course { id } => {
                service.drop_course(id).await?;
                self.state.enrollments.remove_course(id);
                self.ui.success(&format!("Dropped course {}", id));
            }
            DropCommand::Topic { id } => {
                service.drop_topic(id).await?;
                self.state.enrollments.remove_topic(id);
                self.ui.success(&format!("Dropped topic {}", id));
            }
        }
        Ok(())
    }

    async fn refetch_enrollments_or_warn(&mut self, client: &HttpClient) {
        let service = EnrollmentService::new(client);

        match service.fetch_enrolled_courses().await {
            Ok(ids) => self.state.enrollments.set_course_ids(ids),
            Err(e) => self
                .ui
                .warning(&format!("Could not refresh course enrollments: {}", e)),
        }
        match service.fetch_enrolled_topics().await {
            Ok(ids) => self.state.enrollments.set_topic_ids(ids),
            Err(e) => self
                .ui
                .warning(&format!("Could not refresh topic enrollments: {}", e)),
        }
        match service.fetch_enrolled_classes().await {
            Ok(ids) => self.state.enrollments.set_class_ids(ids),
            Err(e) => self
                .ui
                .warning(&format!("Could not refresh class enrollments: {}", e)),
        }
    }

    // ==================== Presentations ====================

    async fn handle_presentation(&mut self, command: PresentationCommand) -> Result<()> {
        let client = self.build_client().await?;
        let config = self.load_config().await?;
        let service = PresentationService::new(&client);

        match command {
            PresentationCommand::Create {
                class,
                topic,
                group,
            } => {
                let presentation = service
                    .create(CreatePresentationRequest {
                        class_id: class,
                        topic_id: topic,
                        group_id: group,
                    })
                    .await?;
                self.state.presentations.insert_front(presentation.clone());
                self.ui.success(&format!(
                    "Created draft presentation {} for topic {}",
                    presentation.id, presentation.topic_id
                ));
            }
            PresentationCommand::Show { id } => {
                let presentation = service.get(id).await?;
                self.render_presentation_card(&presentation);
            }
            PresentationCommand::List { group } => {
                let presentations = service.list_for_group(group).await?;
                for p in &presentations {
                    println!(
                        "{:>6}  topic {:>4}  {:?}  slide: {}  media: {}",
                        p.id,
                        p.topic_id,
                        p.status,
                        if p.slide_confirmed { "confirmed" } else { "pending" },
                        if p.media_confirmed { "confirmed" } else { "pending" },
                    );
                }
                self.state.presentations.set_page(crate::client::Page {
                    items: presentations,
                    pagination: None,
                });
            }
            PresentationCommand::Upload { id, slide, media } => {
                if slide.is_none() && media.is_none() {
                    return Err(OratorError::invalid_input(
                        "Provide --slide and/or --media to upload",
                    ));
                }

                let presentation = service.get(id).await?;
                let mut flow = UploadFlow::new(&client, &presentation, !config.verbose);

                if let Some(path) = slide {
                    flow.attach(SlotKind::Slide, &path).await?;
                    self.ui.success("Slide uploaded; confirm it when ready");
                }
                if let Some(path) = media {
                    flow.attach(SlotKind::Media, &path).await?;
                    self.ui.success("Media uploaded; confirm it when ready");
                }
            }
            PresentationCommand::Confirm { id, slide, media } => {
                if !slide && !media {
                    return Err(OratorError::invalid_input(
                        "Provide --slide and/or --media to confirm",
                    ));
                }

                let presentation = service.get(id).await?;
                let mut flow = UploadFlow::new(&client, &presentation, false);

                if slide {
                    flow.confirm(SlotKind::Slide).await?;
                    self.ui.success("Slide confirmed");
                }
                if media {
                    flow.confirm(SlotKind::Media).await?;
                    self.ui.success("Media confirmed");
                }
            }
            PresentationCommand::Submit { id } => {
                let presentation = service.get(id).await?;
                let mut flow = UploadFlow::new(&client, &presentation, false);

                let submitted = flow.submit().await?;
                self.state.presentations.replace(submitted.clone());
                self.ui.success(&format!(
                    "Presentation {} submitted ({:?})",
                    submitted.id, submitted.status
                ));
            }
        }
        Ok(())
    }

    fn render_presentation_card(&self, presentation: &Presentation) {
        let slot = |file: &Option<orator_protocol::PresentationFile>, confirmed: bool| {
            match (file, confirmed) {
                (Some(f), true) => format!(
                    "{} ({}, confirmed)",
                    f.file_name,
                    crate::ui::format_size_colored(f.size_bytes)
                ),
                (Some(f), false) => format!(
                    "{} ({}, unconfirmed)",
                    f.file_name,
                    crate::ui::format_size_colored(f.size_bytes)
                ),
                (None, _) => "empty".to_string(),
            }
        };

        self.ui.card(
            &format!("Presentation {}", presentation.id),
            vec![
                ("Class", presentation.class_id.to_string()),
                ("Topic", presentation.topic_id.to_string()),
                ("Group", presentation.group_id.to_string()),
                ("Status", format!("{:?}", presentation.status)),
                (
                    "Slide",
                    slot(&presentation.slide_file, presentation.slide_confirmed),
                ),
                (
                    "Media",
                    slot(&presentation.media_file, presentation.media_confirmed),
                ),
            ],
        );
    }

    // ==================== Admin ====================

    async fn handle_admin(&mut self, command: AdminCommand) -> Result<()> {
        let client = self.build_client().await?;

        // UX gate only; the backend is the real authority.
        let is_admin = client
            .current_user()
            .map(|u: User| u.is_admin())
            .unwrap_or(false);
        if !is_admin {
            self.ui
                .warning("Your session does not carry the admin role; the server may reject this");
        }

        let service = AdminService::new(&client);

        match command {
            AdminCommand::Users(args) => {
                let page = service.list_users(page_query(&args)).await?;
                self.state.users.set_page(page);
                for user in &self.state.users.items {
                    let roles = user
                        .roles
                        .iter()
                        .map(|r| format!("{:?}", r).to_lowercase())
                        .collect::<Vec<_>>()
                        .join(",");
                    println!(
                        "{:>6}  {:<30} {:<30} [{}]",
                        user.id, user.full_name, user.email, roles
                    );
                }
                if let Some(p) = &self.state.users.pagination {
                    self.ui.info(&format!(
                        "Page {}/{} ({} total)",
                        p.page, p.total_pages, p.total
                    ));
                }
            }
            AdminCommand::SetRoles { user_id, roles } => {
                let roles = roles
                    .iter()
                    .map(|r| parse_role(r))
                    .collect::<Result<Vec<_>>>()?;
                let user = service.update_roles(user_id, roles).await?;
                self.state.users.replace(user.clone());
                self.ui
                    .success(&format!("Updated roles for {} <{}>", user.full_name, user.email));
            }
            AdminCommand::DeleteUser { user_id } => {
                service.delete_user(user_id).await?;
                self.state.users.remove(user_id);
                self.ui.success(&format!("Deleted user {}", user_id));
            }
        }
        Ok(())
    }
}
